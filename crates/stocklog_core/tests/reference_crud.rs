use stocklog_core::db::open_db_in_memory;
use stocklog_core::{
    category_name, Category, NameList, NewProduct, Product, ReferenceRepository,
    ReferenceService, ReferenceServiceError, RepoError, SqliteReferenceRepository,
    UNKNOWN_CATEGORY,
};

#[test]
fn name_lists_are_listed_case_insensitively() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteReferenceRepository::new(&conn);

    for name in ["wim", "Anna", "bert"] {
        repo.add_name(NameList::Users, name).unwrap();
    }
    repo.add_name(NameList::Locations, "Kantoor 1.1").unwrap();

    assert_eq!(
        repo.list_names(NameList::Users).unwrap(),
        vec!["Anna", "bert", "wim"]
    );
    assert_eq!(
        repo.list_names(NameList::Locations).unwrap(),
        vec!["Kantoor 1.1"]
    );
    assert!(repo.list_names(NameList::Purposes).unwrap().is_empty());
}

#[test]
fn duplicate_and_missing_names_are_reported() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteReferenceRepository::new(&conn);
    repo.add_name(NameList::Purposes, "Training").unwrap();

    let duplicate = repo.add_name(NameList::Purposes, "Training").unwrap_err();
    assert!(matches!(duplicate, RepoError::Duplicate { .. }));

    let missing = repo
        .rename_name(NameList::Purposes, "Reparatie", "Herstel")
        .unwrap_err();
    assert!(matches!(missing, RepoError::NotFound { .. }));

    let missing = repo.delete_name(NameList::Purposes, "Reparatie").unwrap_err();
    assert!(matches!(missing, RepoError::NotFound { .. }));
}

#[test]
fn service_trims_names_and_rejects_blank_duplicate_or_unchanged() {
    let conn = open_db_in_memory().unwrap();
    let service = ReferenceService::new(SqliteReferenceRepository::new(&conn));

    let added = service
        .add_name(NameList::Users, "  Jan Janssen ", &[])
        .unwrap();
    assert_eq!(added, "Jan Janssen");

    let blank = service.add_name(NameList::Users, "   ", &[]).unwrap_err();
    assert!(matches!(blank, ReferenceServiceError::BlankName));

    let known = vec![added.clone()];
    let duplicate = service
        .add_name(NameList::Users, "Jan Janssen", &known)
        .unwrap_err();
    assert!(matches!(duplicate, ReferenceServiceError::Duplicate(name) if name == "Jan Janssen"));

    let unchanged = service
        .rename_name(NameList::Users, "Jan Janssen", " Jan Janssen")
        .unwrap_err();
    assert!(matches!(unchanged, ReferenceServiceError::Unchanged));

    let renamed = service
        .rename_name(NameList::Users, "Jan Janssen", "Jan Peeters")
        .unwrap();
    assert_eq!(renamed, "Jan Peeters");

    service.remove_name(NameList::Users, "Jan Peeters").unwrap();
    let repo = SqliteReferenceRepository::new(&conn);
    assert!(repo.list_names(NameList::Users).unwrap().is_empty());
}

#[test]
fn duplicate_from_storage_maps_to_service_duplicate() {
    let conn = open_db_in_memory().unwrap();
    let service = ReferenceService::new(SqliteReferenceRepository::new(&conn));
    service
        .add_name(NameList::Locations, "Kantoor 1.1", &[])
        .unwrap();

    let err = service
        .add_name(NameList::Locations, "Kantoor 1.1", &[])
        .unwrap_err();

    assert!(matches!(err, ReferenceServiceError::Duplicate(_)));
}

#[test]
fn categories_can_be_renamed_and_deleted_under_products() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteReferenceRepository::new(&conn);
    let service = ReferenceService::new(SqliteReferenceRepository::new(&conn));

    let category = service.add_category("Reinigers", &[]).unwrap();
    let product = service
        .add_product(&NewProduct {
            name: "Foam Cleaner".to_string(),
            qr_code: "IFMC005".to_string(),
            category_id: Some(category.id.clone()),
        })
        .unwrap();

    let renamed = service
        .rename_category(&category, "Schoonmaak", &repo.list_categories().unwrap())
        .unwrap();
    assert_eq!(renamed.id, category.id);
    let categories = repo.list_categories().unwrap();
    assert_eq!(category_name(&categories, &product), Some("Schoonmaak"));

    let unchanged = service
        .rename_category(&renamed, "Schoonmaak", &categories)
        .unwrap_err();
    assert!(matches!(unchanged, ReferenceServiceError::Unchanged));

    service.remove_category(&category.id).unwrap();
    let categories = repo.list_categories().unwrap();
    let products = repo.list_products().unwrap();
    assert_eq!(products[0].category_id.as_deref(), Some(category.id.as_str()));
    assert_eq!(category_name(&categories, &products[0]), Some(UNKNOWN_CATEGORY));

    let missing = service.remove_category(&category.id).unwrap_err();
    assert!(matches!(
        missing,
        ReferenceServiceError::Repo(RepoError::NotFound { .. })
    ));
}

#[test]
fn category_names_stay_unique() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteReferenceRepository::new(&conn);
    let service = ReferenceService::new(SqliteReferenceRepository::new(&conn));

    service.add_category("Reinigers", &[]).unwrap();
    let onderhoud = service
        .add_category("Onderhoud", &repo.list_categories().unwrap())
        .unwrap();

    let duplicate = service
        .add_category(" Reinigers ", &repo.list_categories().unwrap())
        .unwrap_err();
    assert!(matches!(duplicate, ReferenceServiceError::Duplicate(name) if name == "Reinigers"));

    let clash = service
        .rename_category(&onderhoud, "Reinigers", &repo.list_categories().unwrap())
        .unwrap_err();
    assert!(matches!(clash, ReferenceServiceError::Duplicate(_)));

    let names = repo
        .list_categories()
        .unwrap()
        .into_iter()
        .map(|category| category.name)
        .collect::<Vec<_>>();
    assert_eq!(names, vec!["Onderhoud", "Reinigers"]);
}

#[test]
fn product_edits_keep_identity_and_attachments() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteReferenceRepository::new(&conn);
    let service = ReferenceService::new(SqliteReferenceRepository::new(&conn));

    let product = service
        .add_product(&NewProduct {
            name: "Fin Super".to_string(),
            qr_code: "  ".to_string(),
            category_id: None,
        })
        .unwrap();
    assert_eq!(product.qr_code, None);
    assert!(product.created_at.is_some());

    let attached = service
        .set_attachment(&product, "https://files.example/fin.pdf", "fin.pdf")
        .unwrap();
    assert!(attached.has_attachment());

    let mut edited = attached.clone();
    edited.name = "Fin Super 400ml".to_string();
    edited.qr_code = Some("IFMK006".to_string());
    let updated = service.update_product(&attached, &edited).unwrap();
    assert_eq!(updated.id, product.id);
    assert_eq!(updated.attachment_name.as_deref(), Some("fin.pdf"));

    let unchanged = service.update_product(&updated, &updated).unwrap_err();
    assert!(matches!(unchanged, ReferenceServiceError::Unchanged));

    let stored = repo.list_products().unwrap();
    assert_eq!(stored, vec![updated.clone()]);

    let detached = service.remove_attachment(&updated).unwrap();
    assert!(!detached.has_attachment());
    assert!(!repo.list_products().unwrap()[0].has_attachment());
}

#[test]
fn generated_qr_code_is_stored_on_the_product() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteReferenceRepository::new(&conn);
    let service = ReferenceService::new(SqliteReferenceRepository::new(&conn));
    let product = service
        .add_product(&NewProduct {
            name: "Metal Clean spray".to_string(),
            ..NewProduct::default()
        })
        .unwrap();

    let updated = service
        .assign_generated_qr_code(&product, 1_718_444_123_456)
        .unwrap();

    assert_eq!(updated.qr_code.as_deref(), Some("METALCLEAN_123456"));
    assert_eq!(repo.list_products().unwrap()[0].qr_code, updated.qr_code);
}

#[test]
fn missing_products_are_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteReferenceRepository::new(&conn);
    let ghost = Product::with_id("ghost", "Ghost");

    assert!(matches!(
        repo.update_product(&ghost).unwrap_err(),
        RepoError::NotFound { .. }
    ));
    assert!(matches!(
        repo.delete_product("ghost").unwrap_err(),
        RepoError::NotFound { .. }
    ));

    repo.create_category(&Category::with_id("1", "Smeermiddelen"))
        .unwrap();
    assert!(matches!(
        repo.create_category(&Category::with_id("1", "Other"))
            .unwrap_err(),
        RepoError::Duplicate { .. }
    ));
}
