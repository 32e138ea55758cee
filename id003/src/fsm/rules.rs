// id003-rs/id003/src/fsm/rules.rs

use super::state::State;
use super::trigger::Trigger;

/// Source states a rule accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sources {
    /// Every state.
    Any,
    /// Only the listed states.
    Only(&'static [State]),
}

impl Sources {
    /// Whether a rule with these sources applies in `state`.
    pub fn contains(&self, state: State) -> bool {
        match self {
            Self::Any => true,
            Self::Only(states) => states.contains(&state),
        }
    }
}

/// One row of the transition table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    /// Trigger the row answers to.
    pub trigger: Trigger,
    /// States it may fire from.
    pub from: Sources,
    /// Where it leads.
    pub to: State,
}

const fn any(trigger: Trigger, to: State) -> Rule {
    Rule {
        trigger,
        from: Sources::Any,
        to,
    }
}

const fn only(trigger: Trigger, from: &'static [State], to: State) -> Rule {
    Rule {
        trigger,
        from: Sources::Only(from),
        to,
    }
}

use State as S;
use Trigger as T;

/// Transition table. Rules are tried in order; the first one whose trigger
/// matches and whose sources contain the current state wins.
pub static RULES: &[Rule] = &[
    only(T::Start, &[S::Failure], S::Start),
    any(T::BadFrame, S::BadFrame),
    only(T::CommError, &[S::Start], S::ComError),
    only(T::Connect, &[S::Start], S::Connected),
    only(T::Connect, &[S::Refresh], S::Disable),
    only(T::Refresh, &[S::Start], S::Refresh),
    any(T::PowerUp, S::PowerUp),
    only(
        T::PowerUpAcceptor,
        &[S::Accepting, S::Escrow, S::Stacking, S::Paused],
        S::PowerUp,
    ),
    only(
        T::PowerUpStacker,
        &[S::Stacking, S::VendValid, S::Stacked, S::Paused],
        S::PowerUp,
    ),
    any(T::Denominations, S::Denominations),
    any(T::Version, S::Version),
    any(T::CurrencyPath, S::CurrencyPath),
    any(T::SetCount, S::SetCount),
    any(T::SetCurrentCount, S::SetCurrentCount),
    any(T::Count, S::Count),
    any(T::Paying, S::Paying),
    any(T::PayStay, S::PayStay),
    any(T::PayValid, S::PayValid),
    any(T::InvalidCommand, S::InvalidCommand),
    any(T::RecyclerUnitFailure, S::RecyclerUnitFailure),
    any(T::Initialize, S::Initialize),
    any(T::Enable, S::Enable),
    any(T::Disable, S::Disable),
    only(
        T::Escrow,
        &[S::Paused, S::Enable, S::Accepting, S::Escrow],
        S::Escrow,
    ),
    only(
        T::Returning,
        &[S::Escrow, S::Returning, S::Paused],
        S::Returning,
    ),
    only(
        T::Stacking,
        &[S::Escrow, S::Stacking, S::Paused],
        S::Stacking,
    ),
    only(
        T::VendValid,
        &[S::Connected, S::Escrow, S::Stacking, S::VendValid, S::Paused],
        S::VendValid,
    ),
    only(
        T::Stacked,
        &[S::VendValid, S::Stacked, S::Paused],
        S::Stacked,
    ),
    only(
        T::Rejecting,
        &[S::Accepting, S::Rejecting, S::Escrow, S::Stacking, S::Paused],
        S::Rejecting,
    ),
    any(T::StackerOpen, S::StackerOpen),
    only(
        T::StackerFull,
        &[S::StackerFull, S::Stacked, S::VendValid, S::Paused],
        S::StackerFull,
    ),
    only(
        T::Accepting,
        &[S::Paused, S::Enable, S::Accepting],
        S::Accepting,
    ),
    any(T::Failure, S::Failure),
    any(T::AcceptorJam, S::AcceptorJam),
    any(T::StackerJam, S::StackerJam),
    any(T::Cheated, S::Cheated),
    any(T::Pause, S::Paused),
];

/// Target state for `trigger` fired in `state`, if any rule allows it.
pub fn target(trigger: Trigger, state: State) -> Option<State> {
    RULES
        .iter()
        .find(|r| r.trigger == trigger && r.from.contains(state))
        .map(|r| r.to)
}
