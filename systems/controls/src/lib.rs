#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system translating held inputs into world commands.

use pacmaze_core::{AdversaryView, Command, Control, InputState, RoundPhase};

/// Stateless translator from [`InputState`] to round and movement commands.
#[derive(Debug, Default)]
pub struct Controls;

impl Controls {
    /// Emits the commands requested by the inputs held during this tick.
    ///
    /// A reset takes precedence over every other input and is honoured only
    /// once a round has been started. The start signal is ignored while a
    /// round is in progress. Movement is emitted in resolution order so each
    /// held direction probes from the position committed by the previous one.
    pub fn handle(
        &self,
        input: &InputState,
        phase: RoundPhase,
        adversaries: &AdversaryView,
        out: &mut Vec<Command>,
    ) {
        if input.reset && phase != RoundPhase::NotStarted {
            out.push(Command::ResetRound);
            return;
        }

        match phase {
            RoundPhase::NotStarted | RoundPhase::Over => {
                if input.start {
                    out.push(Command::StartRound);
                }
            }
            RoundPhase::InProgress => {
                out.extend(
                    input
                        .player
                        .iter()
                        .map(|direction| Command::StepPlayer { direction }),
                );

                for adversary in adversaries
                    .iter()
                    .filter(|adversary| adversary.control == Control::SecondPlayer)
                {
                    out.extend(input.rival.iter().map(|direction| Command::StepAdversary {
                        adversary: adversary.id,
                        direction,
                    }));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pacmaze_core::{
        ActorColor, AdversaryId, AdversarySnapshot, Direction, DirectionSet, GridPoint,
        StepOffset,
    };

    fn adversary(id: u32, control: Control) -> AdversarySnapshot {
        let spawn = GridPoint::new(3.5, 3.5);
        AdversarySnapshot {
            id: AdversaryId::new(id),
            control,
            color: ActorColor::from_rgb(0xff, 0, 0),
            spawn,
            offset: StepOffset::ZERO,
            position: spawn,
            cell: spawn.cell(),
            heading: None,
        }
    }

    fn commands(input: InputState, phase: RoundPhase, view: &AdversaryView) -> Vec<Command> {
        let mut out = Vec::new();
        Controls.handle(&input, phase, view, &mut out);
        out
    }

    #[test]
    fn start_is_ignored_while_playing() {
        let input = InputState {
            start: true,
            ..InputState::default()
        };
        let view = AdversaryView::default();
        assert_eq!(
            commands(input, RoundPhase::NotStarted, &view),
            vec![Command::StartRound]
        );
        assert_eq!(
            commands(input, RoundPhase::Over, &view),
            vec![Command::StartRound]
        );
        assert!(commands(input, RoundPhase::InProgress, &view).is_empty());
    }

    #[test]
    fn reset_requires_a_started_round_and_suppresses_movement() {
        let input = InputState {
            reset: true,
            player: DirectionSet::from_directions(&[Direction::Up]),
            ..InputState::default()
        };
        let view = AdversaryView::default();
        assert!(commands(input, RoundPhase::NotStarted, &view).is_empty());
        assert_eq!(
            commands(input, RoundPhase::InProgress, &view),
            vec![Command::ResetRound]
        );
        assert_eq!(
            commands(input, RoundPhase::Over, &view),
            vec![Command::ResetRound]
        );
    }

    #[test]
    fn held_directions_are_emitted_in_resolution_order() {
        let input = InputState {
            player: DirectionSet::from_directions(&[Direction::Down, Direction::Left]),
            ..InputState::default()
        };
        assert_eq!(
            commands(input, RoundPhase::InProgress, &AdversaryView::default()),
            vec![
                Command::StepPlayer {
                    direction: Direction::Left
                },
                Command::StepPlayer {
                    direction: Direction::Down
                },
            ]
        );
    }

    #[test]
    fn rival_keys_only_drive_second_player_adversaries() {
        let input = InputState {
            rival: DirectionSet::from_directions(&[Direction::Right]),
            ..InputState::default()
        };
        let view = AdversaryView::from_snapshots(vec![
            adversary(0, Control::RandomWander),
            adversary(1, Control::SecondPlayer),
        ]);
        assert_eq!(
            commands(input, RoundPhase::InProgress, &view),
            vec![Command::StepAdversary {
                adversary: AdversaryId::new(1),
                direction: Direction::Right,
            }]
        );
    }

    #[test]
    fn movement_is_dropped_outside_a_round() {
        let input = InputState {
            player: DirectionSet::from_directions(&[Direction::Up]),
            rival: DirectionSet::from_directions(&[Direction::Up]),
            ..InputState::default()
        };
        let view = AdversaryView::from_snapshots(vec![adversary(0, Control::SecondPlayer)]);
        assert!(commands(input, RoundPhase::NotStarted, &view).is_empty());
        assert!(commands(input, RoundPhase::Over, &view).is_empty());
    }
}
