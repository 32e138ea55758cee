use std::time::Instant;

use id003::Error;
use id003::fsm::{Machine, RULES, Sources, State};
use id003::fsm::{State as S, Trigger as T};
use id003::utils::ms;

/// Put a fresh machine into `state` through legal transitions only.
fn machine_in(state: State, now: Instant) -> Machine {
    let mut m = Machine::new(ms(1000));
    let path: &[T] = match state {
        State::Start => &[],
        State::Connected => &[T::Connect],
        State::Refresh => &[T::Refresh],
        State::ComError => &[T::CommError],
        State::PowerUp => &[T::PowerUp],
        State::Denominations => &[T::Denominations],
        State::Version => &[T::Version],
        State::Initialize => &[T::Initialize],
        State::Enable => &[T::Enable],
        State::Disable => &[T::Disable],
        State::Accepting => &[T::Enable, T::Accepting],
        State::Escrow => &[T::Enable, T::Escrow],
        State::Stacking => &[T::Enable, T::Escrow, T::Stacking],
        State::VendValid => &[T::Enable, T::Escrow, T::VendValid],
        State::Stacked => &[T::Enable, T::Escrow, T::VendValid, T::Stacked],
        State::Rejecting => &[T::Enable, T::Accepting, T::Rejecting],
        State::Returning => &[T::Enable, T::Escrow, T::Returning],
        State::StackerOpen => &[T::StackerOpen],
        State::StackerFull => &[T::Pause, T::StackerFull],
        State::AcceptorJam => &[T::AcceptorJam],
        State::StackerJam => &[T::StackerJam],
        State::Cheated => &[T::Cheated],
        State::Failure => &[T::Failure],
        State::BadFrame => &[T::BadFrame],
        State::CurrencyPath => &[T::CurrencyPath],
        State::SetCount => &[T::SetCount],
        State::SetCurrentCount => &[T::SetCurrentCount],
        State::Count => &[T::Count],
        State::Paying => &[T::Paying],
        State::PayStay => &[T::PayStay],
        State::PayValid => &[T::PayValid],
        State::InvalidCommand => &[T::InvalidCommand],
        State::RecyclerUnitFailure => &[T::RecyclerUnitFailure],
        State::Paused => &[T::Pause],
    };
    for &trigger in path {
        m.fire(trigger, now).expect("setup path");
    }
    assert_eq!(m.state(), state);
    m.take_signals();
    m
}

#[test]
fn every_state_is_reachable() {
    let now = Instant::now();
    for state in State::ALL {
        machine_in(state, now);
    }
}

/// The validator transition table written out by hand, in table order:
/// trigger, accepted sources (`None` for any), target.
const TABLE: &[(T, Option<&[S]>, S)] = &[
    (T::Start, Some(&[S::Failure]), S::Start),
    (T::BadFrame, None, S::BadFrame),
    (T::CommError, Some(&[S::Start]), S::ComError),
    (T::Connect, Some(&[S::Start]), S::Connected),
    (T::Connect, Some(&[S::Refresh]), S::Disable),
    (T::Refresh, Some(&[S::Start]), S::Refresh),
    (T::PowerUp, None, S::PowerUp),
    (
        T::PowerUpAcceptor,
        Some(&[S::Accepting, S::Escrow, S::Stacking, S::Paused]),
        S::PowerUp,
    ),
    (
        T::PowerUpStacker,
        Some(&[S::Stacking, S::VendValid, S::Stacked, S::Paused]),
        S::PowerUp,
    ),
    (T::Denominations, None, S::Denominations),
    (T::Version, None, S::Version),
    (T::CurrencyPath, None, S::CurrencyPath),
    (T::SetCount, None, S::SetCount),
    (T::SetCurrentCount, None, S::SetCurrentCount),
    (T::Count, None, S::Count),
    (T::Paying, None, S::Paying),
    (T::PayStay, None, S::PayStay),
    (T::PayValid, None, S::PayValid),
    (T::InvalidCommand, None, S::InvalidCommand),
    (T::RecyclerUnitFailure, None, S::RecyclerUnitFailure),
    (T::Initialize, None, S::Initialize),
    (T::Enable, None, S::Enable),
    (T::Disable, None, S::Disable),
    (
        T::Escrow,
        Some(&[S::Paused, S::Enable, S::Accepting, S::Escrow]),
        S::Escrow,
    ),
    (
        T::Returning,
        Some(&[S::Escrow, S::Returning, S::Paused]),
        S::Returning,
    ),
    (
        T::Stacking,
        Some(&[S::Escrow, S::Stacking, S::Paused]),
        S::Stacking,
    ),
    (
        T::VendValid,
        Some(&[S::Connected, S::Escrow, S::Stacking, S::VendValid, S::Paused]),
        S::VendValid,
    ),
    (
        T::Stacked,
        Some(&[S::VendValid, S::Stacked, S::Paused]),
        S::Stacked,
    ),
    (
        T::Rejecting,
        Some(&[S::Accepting, S::Rejecting, S::Escrow, S::Stacking, S::Paused]),
        S::Rejecting,
    ),
    (T::StackerOpen, None, S::StackerOpen),
    (
        T::StackerFull,
        Some(&[S::StackerFull, S::Stacked, S::VendValid, S::Paused]),
        S::StackerFull,
    ),
    (
        T::Accepting,
        Some(&[S::Paused, S::Enable, S::Accepting]),
        S::Accepting,
    ),
    (T::Failure, None, S::Failure),
    (T::AcceptorJam, None, S::AcceptorJam),
    (T::StackerJam, None, S::StackerJam),
    (T::Cheated, None, S::Cheated),
    (T::Pause, None, S::Paused),
];

/// Where the hand-written table sends `trigger` from `state`.
fn expected(trigger: T, state: S) -> Option<S> {
    TABLE
        .iter()
        .find(|(t, from, _)| *t == trigger && from.map_or(true, |f| f.contains(&state)))
        .map(|&(_, _, to)| to)
}

#[test]
fn rules_match_written_table() {
    assert_eq!(RULES.len(), TABLE.len());
    assert_eq!(RULES.len(), 37);
    for (i, (rule, &(trigger, from, to))) in RULES.iter().zip(TABLE).enumerate() {
        assert_eq!(rule.trigger, trigger, "row {}", i);
        assert_eq!(rule.to, to, "row {}", i);
        match (rule.from, from) {
            (Sources::Any, None) => {}
            (Sources::Only(got), Some(want)) => assert_eq!(got, want, "row {}", i),
            (got, want) => panic!("row {}: sources {:?}, wanted {:?}", i, got, want),
        }
    }
}

#[test]
fn every_rule_from_inside_and_outside() {
    let now = Instant::now();
    for &(trigger, _, _) in TABLE {
        for state in State::ALL {
            let mut m = machine_in(state, now);
            let result = m.fire(trigger, now);

            match expected(trigger, state) {
                Some(to) => {
                    assert_eq!(result.unwrap(), to, "{} from {}", trigger, state);
                    assert_eq!(m.state(), to);
                }
                None => {
                    assert!(
                        matches!(result, Err(Error::InvalidTransition { .. })),
                        "{} from {} should be rejected",
                        trigger,
                        state
                    );
                    assert_eq!(m.state(), state);
                }
            }
        }
    }
}

#[test]
fn connect_target_depends_on_source() {
    assert_eq!(expected(T::Connect, S::Start), Some(S::Connected));
    assert_eq!(expected(T::Connect, S::Refresh), Some(S::Disable));
    let now = Instant::now();
    let mut m = machine_in(State::Refresh, now);
    assert_eq!(m.fire(T::Connect, now).unwrap(), State::Disable);
}

#[test]
fn triggers_outside_the_table_are_rejected() {
    let now = Instant::now();
    for state in State::ALL {
        let mut m = machine_in(state, now);
        assert!(m.fire(T::Collected, now).is_err());
        assert!(m.fire(T::ReturningToBox, now).is_err());
        assert_eq!(m.state(), state);
    }
}

#[test]
fn restricted_rules_name_their_sources() {
    let restricted = RULES
        .iter()
        .filter(|r| matches!(r.from, Sources::Only(_)))
        .count();
    // start, commerror, connect x2, refresh, powerUpAcceptor, powerUpStacker,
    // escrow, returning, stacking, vendValid, stacked, rejecting,
    // stackerFull, accepting
    assert_eq!(restricted, 15);
}

#[test]
fn start_only_from_failure() {
    let now = Instant::now();
    let mut m = machine_in(State::Failure, now);
    assert_eq!(m.fire(id003::fsm::Trigger::Start, now).unwrap(), State::Start);

    let mut m = machine_in(State::Enable, now);
    assert!(m.fire(id003::fsm::Trigger::Start, now).is_err());
}
