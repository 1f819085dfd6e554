use super::js_string;
use crate::scaffold::classify::{Field, FieldArchetype};

/// `YYYY-MM-DD HH:mm:ss`, as a JavaScript regex literal.
pub const TEMPORAL_PATTERN: &str = r"/^\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}$/";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaContext {
    Create,
    Update,
}

/// zod expression validating one field.
pub fn field_schema(field: &Field, context: SchemaContext) -> String {
    let label = &field.label;
    let optional = field.is_optional() || context == SchemaContext::Update;

    let mut expr = match &field.archetype {
        FieldArchetype::PlainText | FieldArchetype::LongText => {
            let mut expr = String::from("z.string()");
            if !optional {
                expr += &format!(".min(1, {})", js_string(&format!("{label}不能为空")));
            }
            if let Some(max) = field.column.max_length {
                expr += &format!(".max({max}, {})", js_string(&format!("{label}长度不能超过{max}个字符")));
            }
            expr
        }
        FieldArchetype::Integer => {
            let mut expr = String::from("z.coerce.number().int()");
            if !optional {
                expr += &format!(".min(1, {})", js_string(&format!("{label}必须大于0")));
            }
            expr
        }
        FieldArchetype::Decimal => {
            let mut expr = String::from("z.coerce.number()");
            if !optional {
                expr += &format!(".positive({})", js_string(&format!("{label}必须大于0")));
            }
            expr
        }
        FieldArchetype::Enumerated(options) => {
            let codes: Vec<&str> = options.iter().map(|o| o.code.as_str()).collect();
            let described: Vec<String> = options.iter().map(|o| format!("{}{}", o.code, o.label)).collect();
            format!(
                "z.coerce.number().int().refine((val) => [{}].includes(val), {{ message: {} }})",
                codes.join(", "),
                js_string(&format!("请选择有效的{label}: {}", described.join(",")))
            )
        }
        FieldArchetype::Temporal => format!(
            "z.string().regex({}, {})",
            TEMPORAL_PATTERN,
            js_string("请输入有效的时间格式(YYYY-MM-DD HH:mm:ss)")
        ),
        FieldArchetype::Boolean => String::from("z.coerce.boolean()"),
    };

    if optional {
        expr += ".optional()";
    }
    expr
}

pub fn schema_fields(fields: &[Field], context: SchemaContext) -> String {
    fields
        .iter()
        .map(|f| format!("  {}: {},", f.name(), field_schema(f, context)))
        .collect::<Vec<_>>()
        .join("\n")
}
