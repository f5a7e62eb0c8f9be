//! Type-name specs for every supported target language.
//!
//! One constructor per language; `all_specs` is what the registry loads.
//! Dynamically typed targets return fixed container names (`Array`, `table`)
//! because element types are not expressible there.

use crate::error::SchemaError;
use crate::expr::Primitive;
use crate::spec::LangTypeSpec;

pub(crate) fn all_specs() -> Vec<LangTypeSpec> {
    vec![
        cpp(),
        csharp(),
        dart(),
        elixir(),
        go(),
        haskell(),
        java(),
        javascript(),
        julia(),
        kotlin(),
        lua(),
        php(),
        python(),
        r(),
        rust(),
        scala(),
        typescript(),
    ]
}

fn cpp() -> LangTypeSpec {
    fn prim(p: Primitive) -> Option<&'static str> {
        Some(match p {
            Primitive::Boolean => "bool",
            Primitive::Integer => "int",
            Primitive::Character => "char",
            Primitive::Float => "float",
            Primitive::Double => "double",
            Primitive::Long => "long long",
            Primitive::String => "string",
            Primitive::Null => return None,
        })
    }
    LangTypeSpec {
        name: "C++",
        primitives: prim,
        format_list: |t| format!("vector<{t}>"),
        format_set: |t| format!("set<{t}>"),
        format_map: |k, v| Ok(format!("map<{k},{v}>")),
    }
}

fn csharp() -> LangTypeSpec {
    fn prim(p: Primitive) -> Option<&'static str> {
        Some(match p {
            Primitive::Boolean => "bool",
            Primitive::Integer => "int",
            Primitive::Character => "char",
            Primitive::Float => "float",
            Primitive::Double => "decimal",
            Primitive::Long => "long",
            Primitive::String => "string",
            Primitive::Null => return None,
        })
    }
    LangTypeSpec {
        name: "CSharp",
        primitives: prim,
        format_list: |t| format!("List<{t}>"),
        format_set: |t| format!("HashSet<{t}>"),
        format_map: |k, v| Ok(format!("Dictionary<{k}, {v}>")),
    }
}

fn dart() -> LangTypeSpec {
    fn prim(p: Primitive) -> Option<&'static str> {
        Some(match p {
            Primitive::Boolean => "bool",
            Primitive::Integer | Primitive::Long => "int",
            Primitive::Character | Primitive::String => "String",
            Primitive::Float | Primitive::Double => "double",
            Primitive::Null => return None,
        })
    }
    LangTypeSpec {
        name: "Dart",
        primitives: prim,
        format_list: |t| format!("List<{t}>"),
        format_set: |t| format!("Set<{t}>"),
        format_map: |k, v| Ok(format!("Map<{k}, {v}>")),
    }
}

fn elixir() -> LangTypeSpec {
    fn prim(p: Primitive) -> Option<&'static str> {
        Some(match p {
            Primitive::Boolean => "boolean",
            Primitive::Integer | Primitive::Long => "integer",
            Primitive::Character | Primitive::String => "String.t()",
            Primitive::Float | Primitive::Double => "float",
            Primitive::Null => return None,
        })
    }
    LangTypeSpec {
        name: "Elixir",
        primitives: prim,
        format_list: |t| format!("[{t}]"),
        format_set: |t| format!("MapSet.t({t})"),
        format_map: |k, v| Ok(format!("%{{{k} => {v}}}")),
    }
}

fn go() -> LangTypeSpec {
    fn prim(p: Primitive) -> Option<&'static str> {
        Some(match p {
            Primitive::Boolean => "bool",
            Primitive::Integer => "int",
            Primitive::Character => "char",
            Primitive::Float | Primitive::Double => "float64",
            Primitive::Long => "int64",
            Primitive::String => "string",
            Primitive::Null => return None,
        })
    }
    LangTypeSpec {
        name: "Go",
        primitives: prim,
        format_list: |t| format!("[]{t}"),
        format_set: |t| format!("map[{t}]bool"),
        format_map: |k, v| Ok(format!("map[{k}]{v}")),
    }
}

fn haskell() -> LangTypeSpec {
    fn prim(p: Primitive) -> Option<&'static str> {
        Some(match p {
            Primitive::Boolean => "Bool",
            Primitive::Integer | Primitive::Long => "Integer",
            Primitive::Character => "Char",
            Primitive::Float | Primitive::Double => "Double",
            Primitive::String => "String",
            Primitive::Null => return None,
        })
    }
    LangTypeSpec {
        name: "Haskell",
        primitives: prim,
        format_list: |t| format!("[{t}]"),
        format_set: |t| format!("Set.Set {t}"),
        format_map: |k, v| Ok(format!("Map.Map {k} {v}")),
    }
}

fn java() -> LangTypeSpec {
    fn prim(p: Primitive) -> Option<&'static str> {
        Some(match p {
            Primitive::Boolean => "Boolean",
            Primitive::Integer => "Integer",
            Primitive::Character => "Character",
            Primitive::Float => "Float",
            Primitive::Double => "Double",
            Primitive::Long => "Long",
            Primitive::String => "String",
            Primitive::Null => return None,
        })
    }
    LangTypeSpec {
        name: "Java",
        primitives: prim,
        format_list: |t| format!("ArrayList<{t}>"),
        format_set: |t| format!("HashSet<{t}>"),
        format_map: |k, v| Ok(format!("Map<{k}, {v}>")),
    }
}

fn javascript() -> LangTypeSpec {
    fn prim(p: Primitive) -> Option<&'static str> {
        Some(match p {
            Primitive::Boolean => "Boolean",
            Primitive::Integer
            | Primitive::Long
            | Primitive::Float
            | Primitive::Double => "Number",
            Primitive::Character | Primitive::String => "String",
            Primitive::Null => return None,
        })
    }
    LangTypeSpec {
        name: "Javascript",
        primitives: prim,
        format_list: |_| "Array".to_string(),
        format_set: |_| "Set".to_string(),
        format_map: |_, _| Ok("Map".to_string()),
    }
}

fn julia() -> LangTypeSpec {
    fn prim(p: Primitive) -> Option<&'static str> {
        Some(match p {
            Primitive::Boolean => "Bool",
            Primitive::Integer | Primitive::Long => "Int64",
            Primitive::Character => "Char",
            Primitive::Float | Primitive::Double => "Float64",
            Primitive::String => "String",
            Primitive::Null => return None,
        })
    }
    LangTypeSpec {
        name: "Julia",
        primitives: prim,
        format_list: |t| format!("Vector{{{t}}}"),
        format_set: |t| format!("Set{{{t}}}"),
        format_map: |k, v| Ok(format!("Dict{{{k}, {v}}}")),
    }
}

fn kotlin() -> LangTypeSpec {
    fn prim(p: Primitive) -> Option<&'static str> {
        Some(match p {
            Primitive::Boolean => "Boolean",
            Primitive::Integer => "Int",
            Primitive::Character => "Char",
            Primitive::Float => "Float",
            Primitive::Double => "Double",
            Primitive::Long => "Long",
            Primitive::String => "String",
            Primitive::Null => return None,
        })
    }
    LangTypeSpec {
        name: "Kotlin",
        primitives: prim,
        format_list: |t| format!("ArrayList<{t}>"),
        format_set: |t| format!("MutableSet<{t}>"),
        format_map: |k, v| Ok(format!("Map<{k}, {v}>")),
    }
}

fn lua() -> LangTypeSpec {
    fn prim(p: Primitive) -> Option<&'static str> {
        Some(match p {
            Primitive::Boolean => "boolean",
            Primitive::Integer
            | Primitive::Long
            | Primitive::Float
            | Primitive::Double => "number",
            Primitive::Character | Primitive::String => "string",
            Primitive::Null => return None,
        })
    }
    LangTypeSpec {
        name: "Lua",
        primitives: prim,
        format_list: |_| "array".to_string(),
        format_set: |_| "table".to_string(),
        format_map: |_, _| Ok("table".to_string()),
    }
}

fn php() -> LangTypeSpec {
    fn prim(p: Primitive) -> Option<&'static str> {
        Some(match p {
            Primitive::Boolean => "boolean",
            Primitive::Integer
            | Primitive::Long
            | Primitive::Float
            | Primitive::Double => "number",
            Primitive::Character | Primitive::String => "string",
            Primitive::Null => return None,
        })
    }
    LangTypeSpec {
        name: "PHP",
        primitives: prim,
        format_list: |_| "array".to_string(),
        format_set: |_| "array".to_string(),
        format_map: |_, _| Ok("array".to_string()),
    }
}

fn python() -> LangTypeSpec {
    fn prim(p: Primitive) -> Option<&'static str> {
        Some(match p {
            Primitive::Boolean => "bool",
            Primitive::Integer | Primitive::Long => "int",
            Primitive::Character | Primitive::String => "str",
            Primitive::Float | Primitive::Double => "float",
            Primitive::Null => return None,
        })
    }
    LangTypeSpec {
        name: "Python",
        primitives: prim,
        format_list: |t| format!("List[{t}]"),
        format_set: |t| format!("Set[{t}]"),
        format_map: |k, v| Ok(format!("Dict[{k}, {v}]")),
    }
}

fn r() -> LangTypeSpec {
    fn prim(p: Primitive) -> Option<&'static str> {
        Some(match p {
            Primitive::Boolean => "logical",
            Primitive::Integer | Primitive::Long => "integer",
            Primitive::Float | Primitive::Double => "numeric",
            Primitive::Character | Primitive::String => "character",
            Primitive::Null => return None,
        })
    }
    fn map(k: &str, v: &str) -> Result<String, SchemaError> {
        // R's named lists cannot be keyed by integers.
        if k == "integer" {
            return Err(SchemaError::UnsupportedShape {
                language: "R",
                what: "maps with integer keys".to_string(),
            });
        }
        Ok(format!("list[{k}, {v}]"))
    }
    LangTypeSpec {
        name: "R",
        primitives: prim,
        format_list: |t| format!("list[{t}]"),
        format_set: |t| format!("list[{t}]"),
        format_map: map,
    }
}

fn rust() -> LangTypeSpec {
    fn prim(p: Primitive) -> Option<&'static str> {
        Some(match p {
            Primitive::Boolean => "bool",
            Primitive::Integer => "i32",
            Primitive::Character => "char",
            Primitive::Float => "f32",
            Primitive::Double => "f64",
            Primitive::Long => "i64",
            Primitive::String => "String",
            Primitive::Null => return None,
        })
    }
    LangTypeSpec {
        name: "Rust",
        primitives: prim,
        format_list: |t| format!("Vec<{t}>"),
        format_set: |t| format!("HashSet<{t}>"),
        format_map: |k, v| Ok(format!("HashMap<{k}, {v}>")),
    }
}

fn scala() -> LangTypeSpec {
    fn prim(p: Primitive) -> Option<&'static str> {
        Some(match p {
            Primitive::Boolean => "Boolean",
            Primitive::Integer => "Int",
            Primitive::Character => "Char",
            Primitive::Float => "Float",
            Primitive::Double => "Double",
            Primitive::Long => "Long",
            Primitive::String => "String",
            Primitive::Null => return None,
        })
    }
    LangTypeSpec {
        name: "Scala",
        primitives: prim,
        format_list: |t| format!("List[{t}]"),
        format_set: |t| format!("HashSet[{t}]"),
        format_map: |k, v| Ok(format!("HashMap[{k}, {v}]")),
    }
}

fn typescript() -> LangTypeSpec {
    fn prim(p: Primitive) -> Option<&'static str> {
        Some(match p {
            Primitive::Boolean => "boolean",
            Primitive::Integer
            | Primitive::Long
            | Primitive::Float
            | Primitive::Double => "number",
            Primitive::Character | Primitive::String => "string",
            Primitive::Null => return None,
        })
    }
    LangTypeSpec {
        name: "TypeScript",
        primitives: prim,
        format_list: |t| format!("Array<{t}>"),
        format_set: |t| format!("Set<{t}>"),
        format_map: |k, v| Ok(format!("Record<{k},{v}>")),
    }
}
