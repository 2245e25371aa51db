use super::*;

#[test]
fn parses_resolve_with_part_number() {
    let cli = Cli::try_parse_from([
        "pricetrack",
        "resolve",
        "https://www.oppo.com/in/smartphones/series-f/f27/.P.P100112",
        "--part-number",
        "SKU123",
    ])
    .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Commands::Resolve {
            part_number: Some(ref p),
            ..
        } if p == "SKU123"
    ));
}

#[test]
fn parses_add_with_affiliate_link() {
    let cli = Cli::try_parse_from([
        "pricetrack",
        "add",
        "https://www.amazon.in/x/dp/B0CX59H5W7",
        "--affiliate-link",
        "https://amzn.to/abc",
    ])
    .unwrap();

    assert!(matches!(
        cli.command,
        Commands::Add {
            part_number: None,
            affiliate_link: Some(ref l),
            ..
        } if l == "https://amzn.to/abc"
    ));
}

#[test]
fn parses_list_store_filter() {
    let cli = Cli::try_parse_from(["pricetrack", "list", "--store", "reliance_digital"]).unwrap();
    assert!(matches!(
        cli.command,
        Commands::List {
            store: Some(StoreType::RelianceDigital)
        }
    ));
}

#[test]
fn list_accepts_legacy_apple_name() {
    let cli = Cli::try_parse_from(["pricetrack", "list", "--store", "unicorn"]).unwrap();
    assert!(matches!(
        cli.command,
        Commands::List {
            store: Some(StoreType::Apple)
        }
    ));
}

#[test]
fn list_rejects_unknown_store() {
    assert!(Cli::try_parse_from(["pricetrack", "list", "--store", "ebay"]).is_err());
}

#[test]
fn remove_requires_uuid() {
    assert!(Cli::try_parse_from(["pricetrack", "remove", "not-a-uuid"]).is_err());

    let id = Uuid::new_v4();
    let cli = Cli::try_parse_from(["pricetrack", "remove", &id.to_string()]).unwrap();
    assert!(matches!(cli.command, Commands::Remove { id: parsed } if parsed == id));
}

#[test]
fn parses_check_dry_run() {
    let cli = Cli::try_parse_from(["pricetrack", "check", "--dry-run"]).unwrap();
    assert!(matches!(cli.command, Commands::Check { dry_run: true }));
}

#[test]
fn parses_item_code_and_variants() {
    let cli = Cli::try_parse_from(["pricetrack", "item-code", "https://www.reliancedigital.in/p/1"])
        .unwrap();
    assert!(matches!(cli.command, Commands::ItemCode { .. }));

    let cli = Cli::try_parse_from(["pricetrack", "variants", "https://www.oppo.com/in/x/.P.P1"])
        .unwrap();
    assert!(matches!(cli.command, Commands::Variants { .. }));
}

#[test]
fn missing_command_is_an_error() {
    assert!(Cli::try_parse_from(["pricetrack"]).is_err());
}
