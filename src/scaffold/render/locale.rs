use convert_case::{Case, Casing};
use serde::Serialize;

use super::js_string;
use crate::scaffold::classify::{Field, Widget};
use crate::scaffold::descriptor::ModuleDescriptor;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Locale {
    #[serde(rename = "zh-CN")]
    ZhCn,
    #[serde(rename = "en-US")]
    EnUs,
    #[serde(rename = "bo-CN")]
    BoCn,
}

/// Fixed UI phrases of one locale.
struct Phrases {
    list: &'static str,
    search: &'static str,
    reset: &'static str,
    create: &'static str,
    edit: &'static str,
    delete: &'static str,
    delete_confirm: &'static str,
    operations: &'static str,
    enter: &'static str,
    choose: &'static str,
}

const ZH_CN: Phrases = Phrases {
    list: "列表",
    search: "查询",
    reset: "重置",
    create: "新建",
    edit: "编辑",
    delete: "删除",
    delete_confirm: "确定删除该记录吗？",
    operations: "操作",
    enter: "请输入",
    choose: "请选择",
};

const EN_US: Phrases = Phrases {
    list: " List",
    search: "Search",
    reset: "Reset",
    create: "Create",
    edit: "Edit",
    delete: "Delete",
    delete_confirm: "Delete this record?",
    operations: "Operations",
    enter: "Please enter ",
    choose: "Please select ",
};

impl Locale {
    pub const ALL: [Locale; 3] = [Locale::ZhCn, Locale::EnUs, Locale::BoCn];

    pub fn code(&self) -> &'static str {
        match self {
            Locale::ZhCn => "zh-CN",
            Locale::EnUs => "en-US",
            Locale::BoCn => "bo-CN",
        }
    }

    // bo-CN falls back to the Chinese wording.
    fn phrases(&self) -> &'static Phrases {
        match self {
            Locale::EnUs => &EN_US,
            Locale::ZhCn | Locale::BoCn => &ZH_CN,
        }
    }

    fn field_label(&self, field: &Field) -> String {
        match self {
            Locale::EnUs => field.name().to_case(Case::Title),
            Locale::ZhCn | Locale::BoCn => field.label.clone(),
        }
    }

    fn menu_label(&self, descriptor: &ModuleDescriptor) -> String {
        match self {
            Locale::EnUs => descriptor.module_key.to_case(Case::Title),
            Locale::ZhCn | Locale::BoCn => descriptor.display_name.clone(),
        }
    }
}

/// Flat message table for one locale: menu and toolbar keys, then a label and a
/// placeholder per field. Field keys live under `<module>.fields.` so no column name
/// can shadow a toolbar key.
pub fn entries(locale: Locale, descriptor: &ModuleDescriptor, fields: &[Field]) -> String {
    let module = &descriptor.module_key;
    let phrases = locale.phrases();
    let menu = locale.menu_label(descriptor);

    let mut pairs: Vec<(String, String)> = vec![
        (format!("menu.{module}"), menu.clone()),
        (format!("menu.{module}.list"), format!("{menu}{}", phrases.list)),
        (format!("{module}.form.search"), phrases.search.to_string()),
        (format!("{module}.form.reset"), phrases.reset.to_string()),
        (format!("{module}.form.create"), phrases.create.to_string()),
        (format!("{module}.form.edit"), phrases.edit.to_string()),
        (format!("{module}.form.delete"), phrases.delete.to_string()),
        (format!("{module}.form.deleteConfirm"), phrases.delete_confirm.to_string()),
        (format!("{module}.columns.operations"), phrases.operations.to_string()),
    ];

    for field in fields {
        let name = field.name();
        let label = locale.field_label(field);
        let prompt = match field.widget() {
            Widget::Select | Widget::Date => phrases.choose,
            Widget::Text => phrases.enter,
        };
        pairs.push((format!("{module}.fields.{name}.placeholder"), format!("{prompt}{label}")));
        pairs.push((format!("{module}.fields.{name}"), label));
    }

    pairs
        .into_iter()
        .map(|(key, value)| format!("  {}: {},", js_string(&key), js_string(&value)))
        .collect::<Vec<_>>()
        .join("\n")
}
