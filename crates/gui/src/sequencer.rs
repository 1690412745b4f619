use std::time::Duration;
use tracing::info;
use vpnclick_core::{Pointer, PointerError, ScreenPoint};

/// Where the three clicks land.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClickTargets {
    /// Client icon (tray/dock), brings the window forward.
    pub icon: ScreenPoint,
    /// VPN tab inside the client window.
    pub tab: ScreenPoint,
    /// Connect/Disconnect toggle button.
    pub button: ScreenPoint,
}

impl Default for ClickTargets {
    fn default() -> Self {
        Self {
            icon: ScreenPoint::new(32, 607),
            tab: ScreenPoint::new(122, 79),
            button: ScreenPoint::new(309, 528),
        }
    }
}

/// Settle delays after each click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClickDelays {
    pub after_icon: Duration,
    pub after_tab: Duration,
    pub after_button: Duration,
}

impl Default for ClickDelays {
    fn default() -> Self {
        Self {
            after_icon: Duration::from_secs(5),
            after_tab: Duration::from_secs(2),
            after_button: Duration::from_secs(15),
        }
    }
}

impl ClickDelays {
    /// Total time one sequence spends waiting.
    pub fn total(&self) -> Duration {
        self.after_icon + self.after_tab + self.after_button
    }
}

/// Performs the icon → tab → button click sequence.
///
/// The same sequence toggles the connection both ways; the caller decides
/// what the click means through the label it passes.
pub struct ClickSequencer<P: Pointer> {
    pointer: P,
    targets: ClickTargets,
    delays: ClickDelays,
}

impl<P: Pointer> ClickSequencer<P> {
    pub fn new(pointer: P, targets: ClickTargets, delays: ClickDelays) -> Self {
        Self {
            pointer,
            targets,
            delays,
        }
    }

    pub fn pointer(&self) -> &P {
        &self.pointer
    }

    /// Run the full sequence, tagging every log line with `label`.
    pub async fn perform(&mut self, label: &str) -> Result<(), PointerError> {
        let steps = [
            ("icon", self.targets.icon, self.delays.after_icon),
            ("tab", self.targets.tab, self.delays.after_tab),
            ("button", self.targets.button, self.delays.after_button),
        ];

        for (step, target, settle) in steps {
            self.pointer.move_to(target)?;
            self.pointer.click(target)?;
            info!(%target, "{}: clicked {}", label, step);
            tokio::time::sleep(settle).await;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Action {
        Move(ScreenPoint),
        Click(ScreenPoint, Instant),
    }

    #[derive(Default)]
    struct RecordingPointer {
        actions: Vec<Action>,
        fail_clicks_at: Option<ScreenPoint>,
    }

    impl Pointer for RecordingPointer {
        fn move_to(&mut self, target: ScreenPoint) -> Result<(), PointerError> {
            self.actions.push(Action::Move(target));
            Ok(())
        }

        fn click(&mut self, at: ScreenPoint) -> Result<(), PointerError> {
            if self.fail_clicks_at == Some(at) {
                return Err(PointerError::Click {
                    target: at,
                    reason: "injection refused".to_string(),
                });
            }
            self.actions.push(Action::Click(at, Instant::now()));
            Ok(())
        }
    }

    /// The paused clock may land up to one timer tick past a deadline.
    fn assert_close(actual: Duration, expected: Duration) {
        assert!(
            actual >= expected && actual < expected + Duration::from_millis(50),
            "expected ~{:?}, got {:?}",
            expected,
            actual
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_clicks_in_order_with_settle_delays() {
        let targets = ClickTargets::default();
        let delays = ClickDelays::default();
        let mut sequencer = ClickSequencer::new(RecordingPointer::default(), targets, delays);

        let start = Instant::now();
        sequencer.perform("Попытка 1").await.unwrap();
        assert_close(start.elapsed(), delays.total());

        let actions = &sequencer.pointer().actions;
        assert_eq!(actions.len(), 6);
        assert_eq!(actions[0], Action::Move(targets.icon));
        assert_eq!(actions[2], Action::Move(targets.tab));
        assert_eq!(actions[4], Action::Move(targets.button));

        let clicks: Vec<_> = actions
            .iter()
            .filter_map(|a| match a {
                Action::Click(point, at) => Some((*point, at.duration_since(start))),
                _ => None,
            })
            .collect();
        let expected = [
            (targets.icon, Duration::ZERO),
            (targets.tab, delays.after_icon),
            (targets.button, delays.after_icon + delays.after_tab),
        ];
        assert_eq!(clicks.len(), expected.len());
        for ((point, offset), (want_point, want_offset)) in clicks.into_iter().zip(expected) {
            assert_eq!(point, want_point);
            assert_close(offset, want_offset);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_click_failure_stops_sequence() {
        let targets = ClickTargets::default();
        let pointer = RecordingPointer {
            fail_clicks_at: Some(targets.tab),
            ..Default::default()
        };
        let mut sequencer = ClickSequencer::new(pointer, targets, ClickDelays::default());

        let err = sequencer.perform("Переподключение").await.unwrap_err();
        assert!(matches!(err, PointerError::Click { target, .. } if target == targets.tab));
        assert!(!sequencer
            .pointer()
            .actions
            .contains(&Action::Move(targets.button)));
    }
}
