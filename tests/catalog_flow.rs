use property_promoter::admin::{AdminPanel, PropertyDraft, UploadFile};
use property_promoter::auth::Credentials;
use property_promoter::backend::{AuthProvider, MemoryBackend};
use property_promoter::catalog::{
    apply_filter, clear_filters, derive_facets, has_active_filters, CatalogSession, FilterState,
};
use property_promoter::contact::property_inquiry_link;
use property_promoter::media::{MediaCarousel, MediaKind, Render};
use property_promoter::Error;
use std::sync::Arc;

fn demo() -> Arc<MemoryBackend> {
    Arc::new(
        MemoryBackend::demo().with_account(Credentials::new("admin@demo.local", "demo-admin"), true),
    )
}

#[tokio::test]
async fn visitor_browses_filters_and_views_media() {
    let backend = demo();
    let mut session = CatalogSession::new(backend.clone());

    let catalog = session.load_catalog().await.unwrap();
    assert_eq!(catalog.len(), 3);
    assert!(catalog.windows(2).all(|w| w[0].created_at >= w[1].created_at));

    let facets = derive_facets(&catalog);
    assert_eq!(facets.types, vec!["Land", "Home", "Commercial"]);
    assert_eq!(facets.locations, vec!["Karur", "Chennai"]);

    let villa_search = FilterState::new("villa", "all", "all");
    let found = apply_filter(&catalog, &villa_search);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].title, "Modern Villa");

    let karur = FilterState::new("", "all", "Karur");
    let in_karur = apply_filter(&catalog, &karur);
    assert!(in_karur.iter().all(|p| p.location == "Karur"));
    assert_eq!(in_karur.len(), 2);

    assert!(has_active_filters(&karur));
    assert_eq!(apply_filter(&catalog, &clear_filters()).len(), catalog.len());

    let lake = catalog.iter().find(|p| p.id == "demo-1").unwrap();
    let mut carousel = MediaCarousel::for_property(lake);
    assert_eq!(carousel.len(), 3);
    carousel.previous();
    assert!(matches!(carousel.render(), Render::Video { .. }));
    assert_eq!(carousel.indicators()[2].kind, MediaKind::Video);
    assert!(matches!(
        carousel.jump_to(5),
        Err(Error::IndexOutOfRange { index: 5, len: 3 })
    ));
    assert_eq!(carousel.current_index(), 2);

    let link = property_inquiry_link("918056987186", lake);
    assert!(link.starts_with("https://wa.me/918056987186?text="));

    session.load_catalog().await.unwrap();
    assert_eq!(backend.recorded_views().await.len(), 3);
}

#[tokio::test]
async fn admin_changes_show_up_after_refetch() {
    let backend = demo();
    let session = backend
        .sign_in(&Credentials::new("admin@demo.local", "demo-admin"))
        .await
        .unwrap();
    let panel = AdminPanel::open(Some(session), backend.clone(), backend.clone()).unwrap();

    let mut catalog_session = CatalogSession::new(backend.clone());
    catalog_session.load_catalog().await.unwrap();

    let mut draft = PropertyDraft {
        title: "Temple Road Plot".to_string(),
        location: "Karur".to_string(),
        price: "₹9 Lakhs".to_string(),
        area: "1500 sq.ft".to_string(),
        kind: "Land".to_string(),
        featured: true,
        ..PropertyDraft::default()
    };
    let report = panel
        .upload_images(
            &mut draft,
            vec![
                UploadFile::new("front.jpg", "image/jpeg", vec![0; 512]),
                UploadFile::new("brochure.pdf", "application/pdf", vec![0; 512]),
            ],
        )
        .await;
    assert_eq!((report.succeeded(), report.failed()), (1, 1));
    panel.create(&draft).await.unwrap();

    let refreshed = catalog_session.load_catalog().await.unwrap();
    let created = refreshed
        .iter()
        .find(|p| p.title == "Temple Road Plot")
        .unwrap();
    assert_eq!(created.image_url.as_deref(), Some(created.images[0].as_str()));

    // Only the new listing is recorded on the second load
    let counts = panel.view_counts().await.unwrap();
    assert_eq!(counts.get(&created.id), Some(&1));
    assert_eq!(counts.values().sum::<usize>(), 4);
}

#[tokio::test]
async fn outage_surfaces_as_fetch_error() {
    let backend = demo();
    backend.set_unavailable(true);

    let err = CatalogSession::new(backend.clone())
        .load_catalog()
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Fetch(_)));
}
