//! Integration tests: readings → MonitorService → sinks.

use airsense::adapters::accessory::AccessoryState;
use airsense::adapters::log_sink::LogEventSink;
use airsense::adapters::readings::SensorReadings;
use airsense::app::events::AppEvent;
use airsense::app::ports::EventSink;
use airsense::app::service::MonitorService;
use airsense::classify::AirQualityCategory;
use airsense::config::MonitorConfig;
use airsense::error::{Error, SensorError};
use airsense::sensors::fusion::{FusionFrame, FusionOutput, OutputKind};

use super::mock_hw::{Cycle, FailingAdc, FixedAdc, MockSensors, RecordingSink};

fn frame(outputs: &[FusionOutput]) -> FusionFrame {
    let mut f = FusionFrame::new();
    for o in outputs {
        f.push(*o).unwrap();
    }
    f
}

/// Forwards every event to both sinks.
struct Tee<'a, A: EventSink, B: EventSink>(&'a mut A, &'a mut B);

impl<A: EventSink, B: EventSink> EventSink for Tee<'_, A, B> {
    fn emit(&mut self, event: &AppEvent) {
        self.0.emit(event);
        self.1.emit(event);
    }
}

fn service() -> MonitorService {
    MonitorService::new(&MonitorConfig::default())
}

#[test]
fn start_emits_started() {
    let mut svc = service();
    let mut sink = RecordingSink::new();
    svc.start(&mut sink);
    assert_eq!(sink.events, vec![AppEvent::Started]);
}

#[test]
fn category_transitions_are_reported_once_per_change() {
    let mut svc = service();
    let mut hw = MockSensors::new([
        Cycle::ok(30.0, 4.0),
        Cycle::ok(45.0, 4.0),
        Cycle::ok(120.0, 4.0),
        Cycle::ok(220.0, 4.0),
        Cycle::ok(220.0, 4.0),
    ]);
    let mut sink = RecordingSink::new();
    for _ in 0..5 {
        svc.cycle(&mut hw, &mut sink).unwrap();
    }

    let changes: Vec<_> = sink
        .events
        .iter()
        .filter_map(|e| match e {
            AppEvent::AirQualityChanged { from, to } => Some((*from, *to)),
            _ => None,
        })
        .collect();
    assert_eq!(
        changes,
        vec![
            (AirQualityCategory::Excellent, AirQualityCategory::Fair),
            (AirQualityCategory::Fair, AirQualityCategory::Poor),
        ]
    );
    assert_eq!(svc.cycle_count(), 5);
    assert_eq!(svc.last_category(), Some(AirQualityCategory::Poor));
}

#[test]
fn battery_low_flag_flips_both_ways() {
    let mut svc = service();
    let mut hw = MockSensors::new([
        Cycle::ok(10.0, 3.9),  // 62 %
        Cycle::ok(10.0, 3.56), // 20 % → low
        Cycle::ok(10.0, 3.5),  // still low
        Cycle::ok(10.0, 3.57), // 21 % → recovered
    ]);
    let mut sink = RecordingSink::new();
    for _ in 0..4 {
        svc.cycle(&mut hw, &mut sink).unwrap();
    }

    let flips: Vec<_> = sink
        .events
        .iter()
        .filter_map(|e| match e {
            AppEvent::BatteryLowChanged(low) => Some(*low),
            _ => None,
        })
        .collect();
    assert_eq!(flips, vec![true, false]);
}

#[test]
fn idle_cycles_do_not_touch_battery_or_count() {
    let mut svc = service();
    let mut hw = MockSensors::new([Cycle::idle(), Cycle::ok(10.0, 4.0), Cycle::idle()]);
    let mut sink = RecordingSink::new();
    assert_eq!(svc.cycle(&mut hw, &mut sink), Ok(None));
    assert!(svc.cycle(&mut hw, &mut sink).unwrap().is_some());
    assert_eq!(svc.cycle(&mut hw, &mut sink), Ok(None));
    assert_eq!(hw.battery_reads, 1);
    assert_eq!(svc.cycle_count(), 1);
}

#[test]
fn battery_fault_still_reports_environment() {
    let mut svc = service();
    let mut hw = MockSensors::new([Cycle {
        env: Ok(Some(super::mock_hw::env(10.0))),
        battery: Err(SensorError::AdcReadFailed),
    }]);
    let mut sink = RecordingSink::new();
    let report = svc.cycle(&mut hw, &mut sink).unwrap().unwrap();

    assert_eq!(report.environment.category, AirQualityCategory::Excellent);
    assert_eq!(report.battery, None);
    assert_eq!(
        sink.events,
        vec![
            AppEvent::SensorFault(SensorError::AdcReadFailed),
            AppEvent::Report(report),
        ]
    );
    assert_eq!(svc.cycle_count(), 1);
}

#[test]
fn failing_adc_does_not_lose_the_fusion_frame() {
    let config = MonitorConfig::default();
    let mut svc = MonitorService::new(&config);
    let mut readings = SensorReadings::new(FailingAdc, &config);
    readings.deliver(frame(&[
        FusionOutput::new(OutputKind::Iaq, 160.0),
        FusionOutput::new(OutputKind::Co2Equivalent, 1100.0),
        FusionOutput::new(OutputKind::BreathVocEquivalent, 2.4),
        FusionOutput::new(OutputKind::CompensatedTemperature, 24.0),
        FusionOutput::new(OutputKind::CompensatedHumidity, 51.0),
    ]));

    let mut accessory = AccessoryState::new();
    let mut recorded = RecordingSink::new();
    let report = svc
        .cycle(&mut readings, &mut Tee(&mut accessory, &mut recorded))
        .unwrap()
        .unwrap();

    assert_eq!(report.environment.category, AirQualityCategory::Moderate);
    assert_eq!(report.battery, None);
    assert_eq!(
        recorded.count(|e| matches!(e, AppEvent::SensorFault(SensorError::AdcReadFailed))),
        1
    );
    let c = accessory.characteristics();
    assert_eq!(c.air_quality, 4);
    assert_eq!(c.carbon_dioxide_level, 1100.0);
    // Battery characteristics keep their start-up values.
    assert_eq!(c.battery_level, 100);
    assert_eq!(c.status_low_battery, 0);
    assert!(!readings.has_pending());
}

#[test]
fn fusion_frame_to_accessory_end_to_end() {
    let config = MonitorConfig::default();
    let mut svc = MonitorService::new(&config);
    // 1.78 V at the pin → 3.56 V at the cell → 20 %.
    let mut readings = SensorReadings::new(FixedAdc(1780), &config);

    readings.deliver_status(0, 0);
    readings.deliver(frame(&[
        FusionOutput::new(OutputKind::Iaq, 100.0)
            .with_accuracy(2)
            .at(5_000_000_000),
        FusionOutput::new(OutputKind::StaticIaq, 98.0),
        FusionOutput::new(OutputKind::Co2Equivalent, 720.0),
        FusionOutput::new(OutputKind::BreathVocEquivalent, 1.1),
        FusionOutput::new(OutputKind::RawTemperature, 25.0),
        FusionOutput::new(OutputKind::RawPressure, 99_800.0),
        FusionOutput::new(OutputKind::RawHumidity, 35.0),
        FusionOutput::new(OutputKind::CompensatedTemperature, 23.9),
        FusionOutput::new(OutputKind::CompensatedHumidity, 39.5),
    ]));

    let mut accessory = AccessoryState::new();
    let mut log = LogEventSink::new();
    let report = svc
        .cycle(&mut readings, &mut Tee(&mut accessory, &mut log))
        .unwrap()
        .unwrap();

    assert_eq!(report.environment.category, AirQualityCategory::Good);
    let battery = report.battery.unwrap();
    assert_eq!(battery.percentage, 20);
    assert!(battery.is_low);
    assert_eq!(report.extras.iaq_accuracy, Some(2));
    assert_eq!(report.extras.static_iaq, Some(98.0));
    assert_eq!(report.extras.pressure_hpa, Some(998.0));
    assert_eq!(report.extras.timestamp_ms, Some(5_000));

    let c = accessory.characteristics();
    assert_eq!(c.air_quality, 2);
    assert_eq!(c.current_temperature, 23.9);
    assert_eq!(c.current_relative_humidity, 39.5);
    assert_eq!(c.carbon_dioxide_level, 720.0);
    assert_eq!(c.voc_density, 1.1);
    assert_eq!(c.battery_level, 20);
    assert_eq!(c.status_low_battery, 1);

    // Frame consumed: the next cycle is idle.
    assert_eq!(svc.cycle(&mut readings, &mut accessory), Ok(None));
    assert_eq!(accessory.updates(), 1);
}

#[test]
fn fusion_error_status_becomes_sensor_fault() {
    let config = MonitorConfig::default();
    let mut svc = MonitorService::new(&config);
    let mut readings = SensorReadings::new(FixedAdc(2000), &config);
    readings.deliver_status(0, -2);

    let mut sink = RecordingSink::new();
    assert_eq!(
        svc.cycle(&mut readings, &mut sink),
        Err(Error::Sensor(SensorError::SensorBus(-2)))
    );
    assert_eq!(sink.events, vec![AppEvent::SensorFault(SensorError::SensorBus(-2))]);
}
