use std::time::Duration;

use tickweave_types::{CacheConfig, Capability, FetchConfig, SortOrder, Timespan, TickweaveError};

#[test]
fn fetch_config_defaults_match_service_limits() {
    let cfg = FetchConfig::default();
    assert_eq!(cfg.max_window_days, 5);
    assert_eq!(cfg.trade_page_ceiling, 50_000);
    assert_eq!(cfg.multiplier, 1);
    assert_eq!(cfg.sort, SortOrder::Asc);
    assert!(cfg.adjusted);
}

#[test]
fn fetch_config_roundtrips_through_json() {
    let cfg = FetchConfig {
        max_window_days: 3,
        sort: SortOrder::Desc,
        ..FetchConfig::default()
    };
    let json = serde_json::to_string(&cfg).unwrap();
    assert!(json.contains("\"sort\":\"desc\""));
    let back: FetchConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back, cfg);
}

#[test]
fn cache_ttl_applies_only_to_reference_capabilities() {
    let cfg = CacheConfig::default();
    assert!(cfg.ttl_for(Capability::Bars).is_none());
    assert!(cfg.ttl_for(Capability::Trades).is_none());
    assert_eq!(
        cfg.ttl_for(Capability::TickerDetail),
        Some(Duration::from_millis(cfg.default_ttl_ms))
    );
}

#[test]
fn cache_overrides_and_zero_ttl_disable() {
    let cfg = CacheConfig::default()
        .with_ttl(Capability::TickerList, Duration::ZERO)
        .with_max_entries(Capability::TickerDetail, 0);
    assert!(cfg.ttl_for(Capability::TickerList).is_none());
    assert_eq!(cfg.capacity_for(Capability::TickerDetail), 1);
    assert_eq!(cfg.capacity_for(Capability::TickerList), cfg.default_max_entries);
}

#[test]
fn timespan_parses_case_insensitively() {
    assert_eq!("Minute".parse::<Timespan>().unwrap(), Timespan::Minute);
    assert_eq!(Timespan::Quarter.to_string(), "quarter");
    let err = "fortnight".parse::<Timespan>().unwrap_err();
    assert!(matches!(err, TickweaveError::InvalidArg(_)));
}
