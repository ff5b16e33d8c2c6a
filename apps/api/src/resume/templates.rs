use crate::models::resume::TemplateInfo;

/// Server-defined template catalog. Reference data only; applying a template
/// does not check membership in this list.
pub const TEMPLATE_CATALOG: &[TemplateInfo] = &[
    TemplateInfo {
        id: "tpl1",
        name: "Professional",
    },
    TemplateInfo {
        id: "tpl2",
        name: "Modern",
    },
    TemplateInfo {
        id: "tpl3",
        name: "Creative",
    },
];

pub fn list_template_catalog() -> &'static [TemplateInfo] {
    TEMPLATE_CATALOG
}
