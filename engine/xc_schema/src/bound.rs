//! A question schema after language binding.

use crate::error::SchemaError;
use crate::expr::TypeExpr;
use crate::spec::{render_schema_type, LangTypeSpec};

/// The parsed, language-bound schema of one question: ordered parameters and
/// the return type, every node carrying its rendered `lang_type`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundSchema {
    pub params: Vec<(String, TypeExpr)>,
    pub return_type: TypeExpr,
}

impl BoundSchema {
    /// Parse the raw generic-string schema and bind it to `spec`.
    ///
    /// `params` are `(name, generic type string)` pairs in declaration order.
    pub fn parse(
        params: &[(&str, &str)],
        return_type: &str,
        spec: &LangTypeSpec,
    ) -> Result<BoundSchema, SchemaError> {
        let params = params
            .iter()
            .map(|(name, type_str)| {
                let expr = TypeExpr::parse(type_str)?;
                Ok(((*name).to_string(), render_schema_type(&expr, spec)?))
            })
            .collect::<Result<Vec<_>, SchemaError>>()?;
        let ret = render_schema_type(&TypeExpr::parse(return_type)?, spec)?;
        Ok(BoundSchema {
            params,
            return_type: ret,
        })
    }

    /// Parameter names in declaration order.
    pub fn input_order(&self) -> Vec<&str> {
        self.params.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// The type of a named parameter.
    pub fn param_type(&self, name: &str) -> Option<&TypeExpr> {
        self.params
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, t)| t)
    }
}
