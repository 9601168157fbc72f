use super::{camel_to_snake, Artifact};
use crate::types::{FieldSpec, FieldType, IntWidth, Target};
use std::fmt::Write as _;

/// proto3 scalar for a declared field type. proto3 has no 8/16-bit integers,
/// so those widen to 32 bits.
fn proto_type(field_type: FieldType) -> &'static str {
    match field_type {
        FieldType::String | FieldType::Auto => "string",
        FieldType::Float => "float",
        FieldType::Double => "double",
        FieldType::Integer(IntWidth::I8 | IntWidth::I16 | IntWidth::I32) => "int32",
        FieldType::Integer(IntWidth::U8 | IntWidth::U16 | IntWidth::U32) => "uint32",
        FieldType::Integer(IntWidth::I64) => "int64",
        FieldType::Integer(IntWidth::U64) => "uint64",
        FieldType::Unspecified => "int32",
    }
}

/// Message definition for one worksheet's rows, nested in a table message
/// holding the repeated row collection.
pub fn render_proto(source: &str, output_name: &str, fields: &[FieldSpec]) -> Artifact {
    let mut out = String::new();
    let _ = writeln!(out, "// Auto generated by xlsx-export from {}", source);
    let _ = writeln!(out, "syntax = \"proto3\";");
    let _ = writeln!(out);
    let _ = writeln!(out, "message {}Table {{", output_name);
    let _ = writeln!(out, "  message {} {{", output_name);
    for (i, field) in fields.iter().enumerate() {
        let _ = writeln!(
            out,
            "    {} {} = {};",
            proto_type(field.field_type),
            field.name,
            i + 1
        );
    }
    let _ = writeln!(out, "  }}");
    let _ = writeln!(out);
    let _ = writeln!(out, "  repeated {} rows = 1;", output_name);
    let _ = writeln!(out, "}}");

    Artifact {
        target: Target::Proto,
        file_name: format!("{}.proto", camel_to_snake(output_name)),
        contents: out.into_bytes(),
        // describes the header only; carries no rows
        records: 0,
    }
}
