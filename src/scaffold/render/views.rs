//! Markup and script fragments for the list view and the edit dialog.
//!
//! Both screens pick widgets through [`Field::widget`], so a column is a select in the
//! search form exactly when it is a select in the dialog.

use convert_case::{Case, Casing};

use super::js_string;
use crate::scaffold::classify::{Field, FieldArchetype, Widget};

/// Field count at which the edit dialog switches to two columns per row.
pub const TWO_COLUMN_THRESHOLD: usize = 8;

const STACKED_WIDTH: u32 = 520;
const TWO_COLUMN_WIDTH: u32 = 800;

/// `role_type` -> `roleTypeOptions`.
pub fn options_name(field: &Field) -> String {
    format!("{}Options", field.name().to_case(Case::Camel))
}

fn indent(text: &str, spaces: usize) -> String {
    let pad = " ".repeat(spaces);
    text.lines()
        .map(|line| if line.is_empty() { String::new() } else { format!("{pad}{line}") })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Locale key of a field's label; its placeholder is the same key plus `.placeholder`.
fn label_key(module: &str, field: &Field) -> String {
    format!("{module}.fields.{}", field.name())
}

fn form_item(module: &str, field: &Field, widget_markup: String) -> String {
    format!(
        "<a-form-item field=\"{name}\" :label=\"$t('{key}')\">\n{widget}\n</a-form-item>",
        name = field.name(),
        key = label_key(module, field),
        widget = indent(&widget_markup, 2)
    )
}

fn search_widget(module: &str, field: &Field) -> String {
    let name = field.name();
    let placeholder = format!("{}.placeholder", label_key(module, field));
    match field.widget() {
        Widget::Select => format!(
            "<a-select v-model=\"formModel.{name}\" :options=\"{}\" :placeholder=\"$t('{placeholder}')\" allow-clear />",
            options_name(field)
        ),
        Widget::Date => format!("<a-range-picker v-model=\"formModel.{name}\" style=\"width: 100%\" />"),
        Widget::Text => format!("<a-input v-model=\"formModel.{name}\" :placeholder=\"$t('{placeholder}')\" allow-clear />"),
    }
}

fn dialog_widget(module: &str, field: &Field) -> String {
    let name = field.name();
    let placeholder = format!("{}.placeholder", label_key(module, field));
    match field.widget() {
        Widget::Select => format!(
            "<a-select v-model=\"form.{name}\" :options=\"{}\" :placeholder=\"$t('{placeholder}')\" />",
            options_name(field)
        ),
        Widget::Date => format!(
            "<a-date-picker v-model=\"form.{name}\" show-time format=\"YYYY-MM-DD HH:mm:ss\" style=\"width: 100%\" />"
        ),
        Widget::Text => format!("<a-input v-model=\"form.{name}\" :placeholder=\"$t('{placeholder}')\" />"),
    }
}

/// One `<a-col>` per field inside the search form row.
pub fn search_form_items(module: &str, fields: &[Field]) -> String {
    fields
        .iter()
        .map(|f| {
            let item = form_item(module, f, search_widget(module, f));
            indent(&format!("<a-col :span=\"8\">\n{}\n</a-col>", indent(&item, 2)), 14)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn search_model_fields(fields: &[Field]) -> String {
    fields
        .iter()
        .map(|f| {
            let empty = match f.widget() {
                Widget::Select => "undefined",
                Widget::Date => "[]",
                Widget::Text => "''",
            };
            format!("      {}: {empty},", f.name())
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Table column definitions, with the operations column last.
pub fn table_columns(module: &str, fields: &[Field]) -> String {
    let mut columns: Vec<String> = fields
        .iter()
        .map(|f| {
            let slot = match f.widget() {
                Widget::Select => format!("\n      slotName: '{}',", f.name()),
                _ => String::new(),
            };
            format!(
                "    {{\n      title: t('{key}'),\n      dataIndex: '{name}',{slot}\n    }},",
                key = label_key(module, f),
                name = f.name()
            )
        })
        .collect();

    columns.push(format!(
        "    {{\n      title: t('{module}.columns.operations'),\n      dataIndex: 'operations',\n      slotName: 'operations',\n    }},"
    ));
    columns.join("\n")
}

/// Cell templates rendering enumerated codes as their labels.
pub fn cell_slots(fields: &[Field]) -> String {
    fields
        .iter()
        .filter(|f| f.widget() == Widget::Select)
        .map(|f| {
            format!(
                "        <template #{name}=\"{{ record }}\">\n          {{{{ optionLabel({options}, record.{name}) }}}}\n        </template>",
                name = f.name(),
                options = options_name(f)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// `computed` option lists for every enumerated field, each followed by a blank line.
pub fn option_constants(fields: &[Field]) -> String {
    fields
        .iter()
        .filter(|f| !f.archetype.options().is_empty())
        .map(|f| {
            let options = f
                .archetype
                .options()
                .iter()
                .map(|o| format!("    {{ label: {}, value: {} }},", js_string(&o.label), o.code))
                .collect::<Vec<_>>()
                .join("\n");
            format!(
                "  const {} = computed<SelectOptionData[]>(() => [\n{options}\n  ]);\n",
                options_name(f)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Dialog form body: stacked below [`TWO_COLUMN_THRESHOLD`] fields, otherwise two
/// fields per `<a-row>`.
pub fn form_items(module: &str, fields: &[Field]) -> String {
    let items: Vec<String> = fields
        .iter()
        .map(|f| form_item(module, f, dialog_widget(module, f)))
        .collect();

    if fields.len() < TWO_COLUMN_THRESHOLD {
        return items.iter().map(|item| indent(item, 6)).collect::<Vec<_>>().join("\n");
    }

    items
        .chunks(2)
        .map(|pair| {
            let cols = pair
                .iter()
                .map(|item| indent(&format!("<a-col :span=\"12\">\n{}\n</a-col>", indent(item, 2)), 2))
                .collect::<Vec<_>>()
                .join("\n");
            indent(&format!("<a-row :gutter=\"16\">\n{cols}\n</a-row>"), 6)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Initial dialog values. Enumerations start at the column default when it is a
/// known code, else at the first option.
pub fn form_defaults(fields: &[Field]) -> String {
    fields
        .iter()
        .map(|f| {
            let value = match &f.archetype {
                FieldArchetype::Enumerated(options) => {
                    let default = f.column.default_value.as_deref().map(str::trim);
                    options
                        .iter()
                        .find(|o| Some(o.code.as_str()) == default)
                        .or_else(|| options.first())
                        .map(|o| o.code.clone())
                        .unwrap_or_else(|| "undefined".to_string())
                }
                FieldArchetype::Integer | FieldArchetype::Decimal => "undefined".to_string(),
                FieldArchetype::Boolean => "false".to_string(),
                FieldArchetype::PlainText | FieldArchetype::LongText | FieldArchetype::Temporal => "''".to_string(),
            };
            format!("    {}: {value},", f.name())
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Client-side rules: required exactly when the create validator requires the field.
pub fn form_rules(module: &str, fields: &[Field]) -> String {
    fields
        .iter()
        .filter_map(|f| {
            let mut rules = Vec::new();
            if !f.is_optional() {
                rules.push(format!(
                    "{{ required: true, message: t('{}.placeholder') }}",
                    label_key(module, f)
                ));
            }
            if let (FieldArchetype::PlainText | FieldArchetype::LongText, Some(max)) = (&f.archetype, f.column.max_length) {
                rules.push(format!("{{ maxLength: {max} }}"));
            }
            (!rules.is_empty()).then(|| format!("    {}: [{}],", f.name(), rules.join(", ")))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn dialog_width(fields: &[Field]) -> u32 {
    if fields.len() >= TWO_COLUMN_THRESHOLD {
        TWO_COLUMN_WIDTH
    } else {
        STACKED_WIDTH
    }
}
