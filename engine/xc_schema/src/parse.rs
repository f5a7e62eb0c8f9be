//! Parser for the generic type-string grammar.
//!
//! ```text
//! T      := NAME | NAME '<' T_LIST '>' | T '[]'
//! T_LIST := T (SEP T)*        SEP is ',' for list/set, ';' for map, '|' for tuple
//! ```
//!
//! `T[]` is sugar for `list<T>` and may not be mixed with angle-bracket syntax
//! at the same node. A tuple whose elements are all identical collapses to
//! `list<T>`, which keeps tuples expressible in targets without heterogeneous
//! tuples.

use crate::error::SchemaError;
use crate::expr::{Primitive, TypeExpr, TypeKind};

impl TypeExpr {
    /// Parse a generic type string.
    pub fn parse(type_str: &str) -> Result<TypeExpr, SchemaError> {
        parse_generic(type_str.trim())
    }
}

fn parse_generic(type_str: &str) -> Result<TypeExpr, SchemaError> {
    if type_str.is_empty() {
        return Err(SchemaError::Malformed("empty type string".to_string()));
    }

    let opens = type_str.matches('<').count();
    let closes = type_str.matches('>').count();
    if opens != closes {
        return Err(SchemaError::Malformed(format!(
            "\"{type_str}\" does not have the same number of < and >"
        )));
    }

    if let Some(idx) = type_str.find("[]") {
        if opens != 0 {
            return Err(SchemaError::Malformed(format!(
                "\"{type_str}\" mixes [] and <> syntax"
            )));
        }
        let mut stripped = String::with_capacity(type_str.len() - 2);
        stripped.push_str(&type_str[..idx]);
        stripped.push_str(&type_str[idx + 2..]);
        return Ok(TypeExpr::list(parse_generic(&stripped)?));
    }

    if opens == 0 {
        return match Primitive::from_name(type_str) {
            Some(p) => Ok(TypeExpr::primitive(p)),
            None if matches!(type_str, "list" | "set" | "map" | "tuple") => Err(
                SchemaError::Malformed(format!("container type `{type_str}` has no element types")),
            ),
            None => Err(SchemaError::Malformed(format!(
                "unknown type name `{type_str}`"
            ))),
        };
    }

    // NAME<...>: split on the first '<', the remainder must close with '>'.
    let open_idx = type_str.find('<').unwrap_or_default();
    let name = &type_str[..open_idx];
    let rest = &type_str[open_idx + 1..];
    let Some(inner) = rest.strip_suffix('>') else {
        return Err(SchemaError::Malformed(format!(
            "\"{type_str}\" has trailing characters after the final >"
        )));
    };

    match name {
        "list" => Ok(TypeExpr::list(parse_generic(inner)?)),
        "set" => Ok(TypeExpr::set(parse_generic(inner)?)),
        "map" => {
            let parts = split_top_level(inner, ';')?;
            if parts.len() != 2 {
                return Err(SchemaError::Malformed(format!(
                    "expected map<KEY;VALUE>, got \"{type_str}\""
                )));
            }
            let key = parse_generic(&parts[0])?;
            match key.as_primitive() {
                Some(p) if p.valid_map_key() => {}
                _ => {
                    return Err(SchemaError::Malformed(format!(
                        "\"{}\" is not a valid map key type",
                        parts[0]
                    )))
                }
            }
            Ok(TypeExpr::map(key, parse_generic(&parts[1])?))
        }
        "tuple" => {
            let parts = split_top_level(inner, '|')?;
            if parts.is_empty() {
                return Err(SchemaError::Malformed(format!(
                    "tuple \"{type_str}\" has no element types"
                )));
            }
            // All-identical element types collapse to a list.
            if parts.iter().all(|p| *p == parts[0]) {
                return Ok(TypeExpr::list(parse_generic(&parts[0])?));
            }
            let elems = parts
                .iter()
                .map(|p| parse_generic(p))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(TypeExpr::tuple(elems))
        }
        _ => Err(SchemaError::Malformed(format!(
            "unknown container type `{name}`"
        ))),
    }
}

/// Split `s` on `sep`, ignoring separators nested inside `<...>`.
fn split_top_level(s: &str, sep: char) -> Result<Vec<String>, SchemaError> {
    let mut out = Vec::new();
    let mut current = String::new();
    let mut depth: i32 = 0;
    for c in s.chars() {
        if c == sep && depth == 0 {
            out.push(std::mem::take(&mut current));
            continue;
        }
        match c {
            '<' => depth += 1,
            '>' => {
                depth -= 1;
                if depth < 0 {
                    return Err(SchemaError::Malformed(format!(
                        "\"{s}\" has unbalanced > characters"
                    )));
                }
            }
            _ => {}
        }
        current.push(c);
    }
    if depth != 0 {
        return Err(SchemaError::Malformed(format!(
            "\"{s}\" has unbalanced < characters"
        )));
    }
    if !current.is_empty() {
        out.push(current);
    }
    Ok(out)
}
