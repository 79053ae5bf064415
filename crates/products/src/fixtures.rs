use agora_metadata::Metadata;

/// Small shop used across the unit tests.
pub(crate) const SHOP: &str = r#"
    [categories.electronics]
    name = "Electronics"
    fieldsets = ["basics"]
    name_field = "basics.title"
    description_field = "basics.summary"
    featured_fields = ["basics.title"]

    [categories.laptops]
    name = "Laptops"
    parent = "electronics"
    fieldsets = ["specs", "condition"]
    featured_fields = ["specs.ram_gb", "condition.state"]

    [fieldsets.basics]
    name = "Basics"

    [[fields.basics]]
    name = "title"
    label = "Title"
    type = "short-text"

    [[fields.basics]]
    name = "summary"
    label = "Summary"
    type = "textarea"
    optional = true

    [fieldsets.specs]
    name = "Specs"

    [[fields.specs]]
    name = "ram_gb"
    label = "RAM (GB)"
    type = "short-text"
    optional = true

    [fieldsets.condition]
    name = "Condition"

    [[fields.condition]]
    name = "state"
    label = "Condition"
    type = "dropdown"
    options = ["new", "used"]

    [[fields.condition]]
    name = "boxed"
    label = "Original box"
    type = "checkbox"
    optional = true
"#;

pub(crate) fn shop() -> Metadata {
    Metadata::from_toml_str(SHOP).expect("fixture metadata is valid")
}

pub(crate) fn thinkpad() -> serde_json::Value {
    serde_json::json!({
        "basics": { "title": "ThinkPad X1", "summary": "Light and sturdy" },
        "specs": { "ram_gb": "16" },
        "condition": { "state": "used", "boxed": false },
    })
}
