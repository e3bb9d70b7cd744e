//! Serve the dealership REST API over a small seeded catalog
//!
//! ```text
//! cargo run --example server [config.yaml]
//! ```

use dealership::prelude::*;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = match std::env::args().nth(1) {
        Some(path) => DealershipConfig::from_yaml_file(&path)?,
        None => DealershipConfig::default(),
    };

    let mut builder = ServerBuilder::new(config);
    let host = builder.build_host()?;

    let spider = CatalogItem::new(CatalogKind::Model, "Spider", 30_000);
    let berlina = CatalogItem::new(CatalogKind::Model, "Berlina", 22_000);
    let sport = CatalogItem::new(CatalogKind::Trim, "Sport", 3_000).with_models([spider.id]);
    let roof = CatalogItem::new(CatalogKind::Accessory, "Tetto panoramico", 1_500)
        .with_models([berlina.id]);
    host.catalog
        .seed([
            spider,
            berlina,
            sport,
            CatalogItem::new(CatalogKind::Trim, "Lusso", 2_500),
            CatalogItem::new(CatalogKind::FuelType, "Benzina", 0),
            CatalogItem::new(CatalogKind::FuelType, "Ibrido", 2_500),
            CatalogItem::new(CatalogKind::Color, "Rosso", 1_000),
            CatalogItem::new(CatalogKind::Color, "Nero", 800),
            CatalogItem::new(CatalogKind::Transmission, "Manuale", 0),
            CatalogItem::new(CatalogKind::Transmission, "Automatico", 2_500),
            roof,
        ])
        .await?;
    host.dealers
        .create(Dealer::new("Autosalone Rossi", 80_000))
        .await?;

    builder.serve_host(host).await
}
