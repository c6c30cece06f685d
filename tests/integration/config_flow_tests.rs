//! Integration tests: stored config → classifiers.

use airsense::adapters::config_store::ConfigStore;
use airsense::app::ports::{ConfigError, ConfigPort};
use airsense::app::service::MonitorService;
use airsense::classify::AirQualityCategory;
use airsense::config::MonitorConfig;
use airsense::error::Error;

use super::mock_hw::{Cycle, MockSensors, RecordingSink};

#[test]
fn stored_thresholds_drive_classification() {
    let store = ConfigStore::new();
    let mut cfg = MonitorConfig::default();
    cfg.iaq.excellent_max = 20.0;
    cfg.battery.low_percent = 50;
    store.save(&cfg).unwrap();

    let loaded = store.load().unwrap();
    let mut svc = MonitorService::new(&loaded);
    let mut hw = MockSensors::new([Cycle::ok(30.0, 3.8)]);
    let mut sink = RecordingSink::new();
    let report = svc.cycle(&mut hw, &mut sink).unwrap().unwrap();

    // 30 would be Excellent with factory thresholds.
    assert_eq!(report.environment.category, AirQualityCategory::Good);
    // 50 % is at the raised low threshold.
    let battery = report.battery.unwrap();
    assert_eq!(battery.percentage, 50);
    assert!(battery.is_low);
}

#[test]
fn blob_survives_a_simulated_reboot() {
    let store = ConfigStore::new();
    let mut cfg = MonitorConfig::default();
    cfg.divider_ratio = 3.0;
    store.save(&cfg).unwrap();

    let rebooted = ConfigStore::with_blob(&store.blob().unwrap());
    assert_eq!(rebooted.load().unwrap().divider_ratio, 3.0);
}

#[test]
fn rejected_update_keeps_previous_config() {
    let store = ConfigStore::new();
    store.save(&MonitorConfig::default()).unwrap();

    let mut bad = MonitorConfig::default();
    bad.battery.full_volts = bad.battery.empty_volts;
    assert!(matches!(
        store.save(&bad),
        Err(ConfigError::ValidationFailed(_))
    ));
    assert_eq!(store.load().unwrap(), MonitorConfig::default());
}

#[test]
fn service_boots_from_a_rebooted_store() {
    let store = ConfigStore::new();
    let mut cfg = MonitorConfig::default();
    cfg.battery.low_percent = 50;
    store.save(&cfg).unwrap();

    let rebooted = ConfigStore::with_blob(&store.blob().unwrap());
    let mut svc = MonitorService::from_config_port(&rebooted).unwrap();
    let mut hw = MockSensors::new([Cycle::ok(10.0, 3.8)]);
    let report = svc
        .cycle(&mut hw, &mut RecordingSink::new())
        .unwrap()
        .unwrap();
    assert!(report.battery.unwrap().is_low);
}

#[test]
fn out_of_range_stored_config_blocks_boot() {
    let mut cfg = MonitorConfig::default();
    cfg.battery_samples = 0;
    let bytes = postcard::to_allocvec(&cfg).unwrap();
    let store = ConfigStore::with_blob(&bytes);
    assert!(matches!(
        MonitorService::from_config_port(&store),
        Err(Error::Config(_))
    ));
}
