//! Catalog listing, compatibility filtering and pricing over a seeded catalog

mod fixtures;

use dealership::prelude::*;
use fixtures::*;

#[tokio::test]
async fn test_listing_deduplicates_by_name() {
    let ctx = context().await;

    let colors = ctx.host.catalog.list_colors().await.unwrap();
    assert_eq!(colors.len(), 1);
    assert_eq!(colors[0].name, "Rosso");

    let first = ctx.host.catalog.list_colors().await.unwrap();
    assert_eq!(first[0].id, colors[0].id);
}

#[tokio::test]
async fn test_listing_each_kind() {
    let ctx = context().await;
    let catalog = &ctx.host.catalog;

    let names = |items: Vec<CatalogItem>| items.into_iter().map(|i| i.name).collect::<Vec<_>>();
    assert_eq!(names(catalog.list_models().await.unwrap()), ["Berlina", "Spider"]);
    assert_eq!(names(catalog.list_trims().await.unwrap()), ["Lusso", "Sport"]);
    assert_eq!(names(catalog.list_fuel_types().await.unwrap()), ["Ibrido"]);
    assert_eq!(names(catalog.list_transmissions().await.unwrap()), ["Automatico"]);
    assert_eq!(
        names(catalog.list_accessories().await.unwrap()),
        ["Spoiler", "Tetto panoramico"]
    );
}

#[tokio::test]
async fn test_compatible_trims_for_model() {
    let ctx = context().await;
    let seeded = &ctx.catalog;

    let for_spider = ctx
        .host
        .catalog
        .list_compatible(CatalogKind::Trim, &seeded.spider.id, None)
        .await
        .unwrap();
    assert_eq!(for_spider.len(), 2);

    let for_berlina = ctx
        .host
        .catalog
        .list_compatible(CatalogKind::Trim, &seeded.berlina.id, None)
        .await
        .unwrap();
    assert_eq!(for_berlina.len(), 1);
    assert_eq!(for_berlina[0].id, seeded.lusso.id);
}

/// Two "Blu" rows: the lower id fits only the Spider, the higher id only the Berlina
async fn seed_split_blue(ctx: &TestContext) -> (CatalogItem, CatalogItem) {
    let mut spider_blue =
        CatalogItem::new(CatalogKind::Color, "Blu", 700).with_models([ctx.catalog.spider.id]);
    let mut berlina_blue =
        CatalogItem::new(CatalogKind::Color, "Blu", 400).with_models([ctx.catalog.berlina.id]);
    spider_blue.id = Uuid::from_u128(1);
    berlina_blue.id = Uuid::from_u128(2);
    ctx.host
        .catalog
        .seed([spider_blue.clone(), berlina_blue.clone()])
        .await
        .unwrap();
    (spider_blue, berlina_blue)
}

#[tokio::test]
async fn test_compatible_listing_keeps_compatible_duplicate() {
    let ctx = context().await;
    let (spider_blue, berlina_blue) = seed_split_blue(&ctx).await;

    let for_berlina = ctx
        .host
        .catalog
        .list_compatible(CatalogKind::Color, &ctx.catalog.berlina.id, None)
        .await
        .unwrap();
    let blue: Vec<_> = for_berlina.iter().filter(|c| c.name == "Blu").collect();
    assert_eq!(blue.len(), 1);
    assert_eq!(blue[0].id, berlina_blue.id);

    let for_spider = ctx
        .host
        .catalog
        .list_compatible(CatalogKind::Color, &ctx.catalog.spider.id, None)
        .await
        .unwrap();
    assert!(for_spider.iter().any(|c| c.id == spider_blue.id));
}

#[tokio::test]
async fn test_duplicate_name_priced_with_compatible_row() {
    let ctx = context().await;
    seed_split_blue(&ctx).await;

    let mut input = physical_berlina("ZFA777");
    input.configuration.exterior_color = "Blu".to_string();
    let vehicle = ctx.host.vehicles.create(input).await.unwrap();

    assert_eq!(vehicle.price, 32_000 - 1_000 + 400);
}

#[tokio::test]
async fn test_catalog_rejects_out_of_range_price() {
    let ctx = context().await;

    let result = ctx
        .host
        .catalog
        .create(CatalogItem::new(CatalogKind::Model, "Hyper", MAX_ITEM_PRICE + 1))
        .await;
    assert!(matches!(result, Err(DealershipError::InvalidArgument { .. })));
}

#[tokio::test]
async fn test_compatible_accessories_filter_trim() {
    let ctx = context().await;
    let seeded = &ctx.catalog;

    let with_lusso = ctx
        .host
        .catalog
        .list_compatible(CatalogKind::Accessory, &seeded.berlina.id, Some(&seeded.lusso.id))
        .await
        .unwrap();
    assert_eq!(with_lusso.len(), 1);
    assert_eq!(with_lusso[0].id, seeded.roof.id);

    let with_sport = ctx
        .host
        .catalog
        .list_compatible(CatalogKind::Accessory, &seeded.berlina.id, Some(&seeded.sport.id))
        .await
        .unwrap();
    assert!(with_sport.is_empty());
}

#[tokio::test]
async fn test_lookup_unknown_id() {
    let ctx = context().await;
    let unknown = Uuid::new_v4();

    assert!(ctx
        .host
        .catalog
        .find(CatalogKind::Model, &unknown)
        .await
        .unwrap()
        .is_none());
    assert!(matches!(
        ctx.host.catalog.get_or_fail(CatalogKind::Model, &unknown).await,
        Err(DealershipError::NotFound { .. })
    ));
}

#[tokio::test]
async fn test_quote_reference_configuration() {
    let ctx = context().await;
    let seeded = &ctx.catalog;

    let quote = ctx
        .host
        .pricing
        .quote(&PriceSelection {
            model_id: Some(seeded.berlina.id),
            trim_id: Some(seeded.lusso.id),
            fuel_type_id: Some(seeded.ibrido.id),
            color_id: Some(seeded.rosso.id),
            transmission_id: Some(seeded.automatico.id),
            accessory_ids: vec![seeded.roof.id],
        })
        .await
        .unwrap();

    assert_eq!(quote.total, 32_000);
    assert_eq!(quote.breakdown.len(), 6);
    assert_eq!(quote.amounts().iter().sum::<i64>(), quote.total);
}

#[tokio::test]
async fn test_quote_after_catalog_change() {
    let ctx = context().await;
    let seeded = &ctx.catalog;
    let selection = PriceSelection {
        model_id: Some(seeded.spider.id),
        accessory_ids: vec![seeded.spoiler.id],
        ..Default::default()
    };

    assert_eq!(ctx.host.pricing.quote(&selection).await.unwrap().total, 30_900);

    ctx.host
        .catalog
        .delete(CatalogKind::Accessory, &seeded.spoiler.id)
        .await
        .unwrap();
    let quote = ctx.host.pricing.quote(&selection).await.unwrap();
    assert_eq!(quote.total, 30_000);
    assert_eq!(quote.breakdown.len(), 1);
}
