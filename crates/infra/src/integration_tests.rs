//! Integration tests for the submission pipeline.
//!
//! Tests: raw JSON → ProductValidator → Projector → ProductStore → moderation
//!
//! Verifies:
//! - Valid submissions are stored pending and come back with derived fields
//! - Invalid submissions never reach the store
//! - Only approved products are listed by category

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use agora_core::{DomainError, ProductId};
    use agora_metadata::{Metadata, DEFAULT_DEFINITION};
    use agora_products::{
        ModerationCommand, ModerationOutcome, ProductService, ServiceError, StoreError, ValidationError,
    };
    use serde_json::json;

    use crate::product_store::InMemoryProductStore;

    fn setup() -> ProductService<Arc<InMemoryProductStore>> {
        let metadata = Metadata::from_toml_str(DEFAULT_DEFINITION).expect("default definition loads");
        ProductService::new(Arc::new(metadata), Arc::new(InMemoryProductStore::new()))
    }

    fn laptop(title: &str) -> Vec<u8> {
        json!({
            "basics": { "title": title, "summary": "Barely used" },
            "condition": { "state": "used", "boxed": true },
            "computer_specs": { "ram_gb": "16", "screen": "14\"" },
        })
        .to_string()
        .into_bytes()
    }

    fn wheelchair() -> Vec<u8> {
        json!({
            "basics": { "title": "Lightweight chair", "summary": "Folds into a car boot" },
            "wheelchair": { "propulsion": "manual", "foldable": true },
        })
        .to_string()
        .into_bytes()
    }

    #[test]
    fn submission_is_stored_pending_with_derived_fields() {
        let service = setup();

        let listed = service.create_product("laptops", &laptop("ThinkPad X1")).unwrap();
        assert!(!listed.product.approved);
        assert_eq!(listed.product.category_slug, "laptops");
        assert_eq!(listed.derived.name, "ThinkPad X1");
        assert_eq!(listed.derived.description, "Barely used");
        assert_eq!(
            listed.derived.featured_fields.keys().collect::<Vec<_>>(),
            vec!["computer_specs.ram_gb", "computer_specs.screen", "condition.state"]
        );
        assert_eq!(listed.derived.featured_fields["condition.state"], json!("used"));

        let fetched = service.get_product(listed.product.id).unwrap();
        assert_eq!(fetched, listed);
    }

    #[test]
    fn inherited_derived_fields_resolve_for_deep_leaves() {
        let service = setup();

        let listed = service.create_product("wheelchairs", &wheelchair()).unwrap();
        assert_eq!(listed.derived.name, "Lightweight chair");
        assert_eq!(listed.derived.featured_fields["wheelchair.foldable"], json!(true));
    }

    #[test]
    fn missing_fieldset_is_rejected_before_storage() {
        let service = setup();
        let payload = json!({
            "basics": { "title": "T", "summary": "S" },
            "condition": { "state": "new" },
        });

        let err = service
            .create_product("laptops", payload.to_string().as_bytes())
            .unwrap_err();
        assert_eq!(
            err,
            ServiceError::Validation(ValidationError::MissingFieldset("computer_specs".to_string()))
        );
        assert_eq!(service.store().is_empty(), Ok(true));
    }

    #[test]
    fn schema_violations_map_to_validation_errors() {
        let service = setup();
        let payload = json!({
            "basics": { "title": "T", "summary": "S" },
            "condition": { "state": "mint" },
            "computer_specs": { "ram_gb": "8", "screen": "13\"" },
        });

        let err = service
            .create_product("laptops", payload.to_string().as_bytes())
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(ValidationError::Schema(_))));
        assert!(matches!(DomainError::from(err), DomainError::Validation(_)));
        assert_eq!(service.store().is_empty(), Ok(true));
    }

    #[test]
    fn malformed_json_is_rejected() {
        let service = setup();
        let err = service.create_product("laptops", b"{not json").unwrap_err();
        assert!(matches!(err, ServiceError::Validation(ValidationError::Parse(_))));
    }

    #[test]
    fn unknown_category_is_not_found() {
        let service = setup();

        let err = service.create_product("boats", &laptop("x")).unwrap_err();
        assert!(matches!(DomainError::from(err), DomainError::NotFound(_)));

        let err = service.products_by_category("boats").unwrap_err();
        assert!(matches!(DomainError::from(err), DomainError::NotFound(_)));
    }

    #[test]
    fn products_cannot_be_filed_under_inner_categories() {
        let service = setup();
        let payload = json!({
            "basics": { "title": "T", "summary": "S" },
            "condition": { "state": "new" },
        });

        let err = service
            .create_product("electronics", payload.to_string().as_bytes())
            .unwrap_err();
        assert_eq!(err, ServiceError::NotALeaf("electronics".to_string()));
        assert_eq!(service.store().is_empty(), Ok(true));
    }

    #[test]
    fn inner_category_is_reported_before_payload_problems() {
        let service = setup();

        for payload in [&b"{}"[..], &b"{not json"[..], &br#"{"condition": {"state": "mint"}}"#[..]] {
            let err = service.create_product("accessibility", payload).unwrap_err();
            assert_eq!(err, ServiceError::NotALeaf("accessibility".to_string()));
        }
        assert_eq!(service.store().is_empty(), Ok(true));
    }

    #[test]
    fn only_approved_products_are_listed_by_category() {
        let service = setup();
        let first = service.create_product("laptops", &laptop("First")).unwrap();
        let second = service.create_product("laptops", &laptop("Second")).unwrap();
        service.create_product("wheelchairs", &wheelchair()).unwrap();

        assert!(service.products_by_category("laptops").unwrap().is_empty());
        assert_eq!(service.pending_products().unwrap().len(), 3);

        service
            .moderate(second.product.id, ModerationCommand::Approve)
            .unwrap();
        service
            .moderate(first.product.id, ModerationCommand::Approve)
            .unwrap();

        let names: Vec<_> = service
            .products_by_category("laptops")
            .unwrap()
            .into_iter()
            .map(|p| p.derived.name)
            .collect();
        assert_eq!(names, vec!["First", "Second"]);
        assert!(service.products_by_category("electronics").unwrap().is_empty());
        assert_eq!(service.pending_products().unwrap().len(), 1);
    }

    #[test]
    fn approving_twice_keeps_the_product_approved() {
        let service = setup();
        let id = service.create_product("laptops", &laptop("A")).unwrap().product.id;

        for _ in 0..2 {
            match service.moderate(id, ModerationCommand::Approve).unwrap() {
                ModerationOutcome::Approved(product) => assert!(product.approved),
                other => panic!("expected approval, got {other:?}"),
            }
        }
        assert!(service.get_product(id).unwrap().product.approved);
    }

    #[test]
    fn rejection_deletes_the_product() {
        let service = setup();
        let id = service.create_product("laptops", &laptop("A")).unwrap().product.id;

        assert_eq!(
            service.moderate(id, ModerationCommand::Reject).unwrap(),
            ModerationOutcome::Rejected(id)
        );
        assert_eq!(
            service.get_product(id).unwrap_err(),
            ServiceError::Store(StoreError::NotFound(id))
        );
        assert!(service.pending_products().unwrap().is_empty());
    }

    #[test]
    fn moderating_unknown_products_is_not_found() {
        let service = setup();
        let id = ProductId::new();

        for command in [ModerationCommand::Approve, ModerationCommand::Reject] {
            let err = service.moderate(id, command).unwrap_err();
            assert!(matches!(DomainError::from(err), DomainError::NotFound(_)));
        }
    }
}
