//! Loading and rendering the per-language template sets.

use include_dir::{include_dir, Dir};
use serde_json::Value;
use tera::{Context, Tera};
use xc_langs::TestCaseLiterals;

use crate::error::GenError;

/// The template tree, embedded at build time from `templates/<Lang>/`.
static TEMPLATE_ROOT: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/templates");

const HEADER: &str = "HEADER";
const MAIN: &str = "MAIN";
const EVALUATION: &str = "EVALUATION";

const TEMPLATE_FILES: [(&str, &str); 3] = [
    (HEADER, "header.txt"),
    (MAIN, "main.txt"),
    (EVALUATION, "evaluation.txt"),
];

/// Everything passed to `MAIN`.
pub struct MainContext<'a> {
    pub params: &'a [String],
    pub signature: &'a str,
    pub test_cases: &'a [TestCaseLiterals],
    pub return_type: &'a str,
    pub debug: bool,
    pub text: Option<&'a str>,
    pub evaluation_function: &'a str,
    pub header: &'a str,
}

/// The three compiled templates of one language.
pub struct TemplateSet {
    tera: Tera,
}

impl TemplateSet {
    /// Load and compile the template set for `language`.
    pub fn for_language(language: &str) -> Result<TemplateSet, GenError> {
        let mut tera = Tera::default();
        for (name, file) in TEMPLATE_FILES {
            let path = format!("{language}/{file}");
            let file = TEMPLATE_ROOT
                .get_file(&path)
                .ok_or_else(|| GenError::MissingTemplate(language.to_string(), name))?;
            let source = file.contents_utf8().ok_or_else(|| {
                GenError::MissingTemplate(language.to_string(), name)
            })?;
            tera.add_raw_template(name, source)?;
        }
        Ok(TemplateSet { tera })
    }

    /// Render `HEADER`. Takes no variables.
    pub fn render_header(&self) -> Result<String, GenError> {
        Ok(self.tera.render(HEADER, &Context::new())?)
    }

    /// Render `EVALUATION` for an equality mode and rendered precision
    /// literal.
    pub fn render_evaluation(
        &self,
        evaluation_method: &str,
        precision: &str,
    ) -> Result<String, GenError> {
        let mut ctx = Context::new();
        ctx.insert("evaluation_method", evaluation_method);
        ctx.insert("precision", precision);
        Ok(self.tera.render(EVALUATION, &ctx)?)
    }

    /// Render `MAIN` — the complete driver, sentinels included.
    pub fn render_main(&self, main: &MainContext<'_>) -> Result<String, GenError> {
        let mut ctx = Context::new();
        ctx.insert("params", main.params);
        ctx.insert("signature", main.signature);
        ctx.insert("test_cases", main.test_cases);
        ctx.insert("return_type", main.return_type);
        ctx.insert("debug", &main.debug);
        ctx.insert("text", &main.text.map(str::to_string).map_or(Value::Null, Value::String));
        ctx.insert("evaluation_function", main.evaluation_function);
        ctx.insert("header", main.header);
        Ok(self.tera.render(MAIN, &ctx)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_language_pack_has_a_complete_template_set() {
        for language in xc_langs::list_languages() {
            let set = TemplateSet::for_language(language);
            assert!(set.is_ok(), "{language}: {:?}", set.err().map(|e| e.to_string()));
        }
    }

    #[test]
    fn unknown_language_is_reported() {
        assert!(matches!(
            TemplateSet::for_language("COBOL"),
            Err(GenError::MissingTemplate(..))
        ));
    }

    #[test]
    fn evaluation_renders_both_methods() {
        let set = TemplateSet::for_language("Python").unwrap();
        let float = set.render_evaluation("float", "0.000001").unwrap();
        assert!(float.contains("0.000001"), "{float}");
        let default = set.render_evaluation("default", "0.000001").unwrap();
        assert!(!default.is_empty());
    }
}
