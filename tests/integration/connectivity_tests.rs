//! Broker-loss and publish-failure scenarios.

use luxring::adapters::mqtt::MqttBroker;
use luxring::app::events::AppEvent;
use luxring::app::ports::{Broker, EncoderLines};
use luxring::app::service::LightController;
use luxring::config::SystemConfig;

use crate::mock_hw::{FakeClock, MockHardware, RecordingSink};

fn controller() -> LightController {
    LightController::new(
        SystemConfig::default(),
        EncoderLines::default(),
        EncoderLines::default(),
        0,
    )
}

#[test]
fn first_cycle_establishes_session() {
    let mut ctl = controller();
    let mut hw = MockHardware::new();
    let mut net = MqttBroker::new("localhost", 1883, "test").unwrap();
    let mut clock = FakeClock::new();
    let mut sink = RecordingSink::new();

    assert!(!net.connected());
    ctl.run_cycle(&mut hw, &mut net, &mut clock, &mut sink);

    assert!(net.connected());
    assert_eq!(
        sink.count_matching(|e| matches!(e, AppEvent::BrokerConnected)),
        1
    );
    // A clean connect takes one attempt and no retry delay.
    assert!(sink.events.contains(&AppEvent::BrokerReconnecting { attempt: 1 }));
    assert_eq!(clock.delays, vec![50]);
}

#[test]
fn session_loss_blocks_until_reconnected() {
    let mut ctl = controller();
    let mut hw = MockHardware::new();
    let mut net = MqttBroker::new("localhost", 1883, "test").unwrap();
    let mut clock = FakeClock::new();
    let mut sink = RecordingSink::new();

    ctl.run_cycle(&mut hw, &mut net, &mut clock, &mut sink);
    sink.events.clear();
    clock.delays.clear();

    // Broker goes away and refuses the next three attempts.
    net.sim_drop_connection();
    net.sim_set_fail_connects(3);
    ctl.run_cycle(&mut hw, &mut net, &mut clock, &mut sink);

    assert!(net.connected());
    for attempt in 1..=4 {
        assert!(sink.events.contains(&AppEvent::BrokerReconnecting { attempt }));
    }
    assert_eq!(
        sink.count_matching(|e| matches!(e, AppEvent::BrokerConnected)),
        1
    );
    // Three failed attempts, each followed by the fixed retry hold,
    // then the cycle's normal pacing delay.
    assert_eq!(clock.delays, vec![5000, 5000, 5000, 50]);
}

#[test]
fn stable_session_emits_no_reconnect_events() {
    let mut ctl = controller();
    let mut hw = MockHardware::new();
    let mut net = MqttBroker::new("localhost", 1883, "test").unwrap();
    let mut clock = FakeClock::new();
    let mut sink = RecordingSink::new();

    ctl.run_cycle(&mut hw, &mut net, &mut clock, &mut sink);
    sink.events.clear();

    for _ in 0..50 {
        ctl.run_cycle(&mut hw, &mut net, &mut clock, &mut sink);
    }
    assert_eq!(
        sink.count_matching(|e| matches!(e, AppEvent::BrokerReconnecting { .. })),
        0
    );
}

// ── Publish failure with a live-looking session ───────────────

/// Holds a session but rejects every publish, as when the TCP link is
/// up but the broker refuses the enqueue.
struct RejectingBroker;

impl Broker for RejectingBroker {
    fn connected(&self) -> bool {
        true
    }

    fn connect(&mut self, _client_id: &str) -> bool {
        true
    }

    fn publish(&mut self, _topic: &str, _payload: &str) -> bool {
        false
    }

    fn poll(&mut self) {}
}

#[test]
fn failed_publish_reports_but_ring_still_updates() {
    let mut ctl = controller();
    let mut hw = MockHardware::new();
    hw.ldr_raw = 3500;
    let mut net = RejectingBroker;
    let mut clock = FakeClock::new();
    let mut sink = RecordingSink::new();

    // One full publish window: 10 samples then the publish attempt.
    for _ in 0..101 {
        ctl.run_cycle(&mut hw, &mut net, &mut clock, &mut sink);
    }

    assert!(sink.events.contains(&AppEvent::PublishFailed(3500)));
    assert_eq!(
        sink.count_matching(|e| matches!(e, AppEvent::AveragePublished(_))),
        0
    );
    // Classification is independent of delivery.
    assert_eq!(ctl.led_count(), 2);
    assert_eq!(hw.lit_count(), 2);
}
