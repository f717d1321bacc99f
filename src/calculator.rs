use crate::savings::{
    CalculatorInputs, SavingsPolicy, SavingsResult, MAX_CATS, MAX_CHANGES, MIN_CATS, MIN_CHANGES,
};

/// Most tree icons the grid will show
pub const MAX_TREE_ICONS: usize = 33;
/// Icons per grid row
pub const ICONS_PER_ROW: usize = 10;

/// Which input control has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Cats,
    Premium,
    Changes,
}

impl Control {
    pub fn next(self) -> Self {
        match self {
            Control::Cats => Control::Premium,
            Control::Premium => Control::Changes,
            Control::Changes => Control::Cats,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Control::Cats => Control::Changes,
            Control::Premium => Control::Cats,
            Control::Changes => Control::Premium,
        }
    }
}

/// A single user interaction with the calculator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalculatorEvent {
    Increment,      // Step the focused slider up (toggles the checkbox)
    Decrement,      // Step the focused slider down (toggles the checkbox)
    SetCats(u8),
    SetChanges(u8),
    SetPremium(bool),
    TogglePremium,
    FocusNext,
    FocusPrev,
    Reset,
}

/// State owned by one calculator widget.
///
/// `result` always matches `inputs` under `policy`: every transition goes
/// through [`CalculatorState::apply`], which recomputes before returning.
#[derive(Debug, Clone, PartialEq)]
pub struct CalculatorState {
    inputs: CalculatorInputs,
    result: SavingsResult,
    focus: Control,
    policy: SavingsPolicy,
}

impl Default for CalculatorState {
    fn default() -> Self {
        Self::new(SavingsPolicy::default(), CalculatorInputs::default())
    }
}

impl CalculatorState {
    /// An invalid policy is logged and replaced by the defaults
    pub fn new(policy: SavingsPolicy, inputs: CalculatorInputs) -> Self {
        let policy = match policy.validate() {
            Ok(()) => policy,
            Err(e) => {
                tracing::warn!("Rejecting savings policy: {}", e);
                SavingsPolicy::default()
            }
        };
        let inputs = CalculatorInputs::new(
            inputs.cats_count,
            inputs.is_premium_litter,
            inputs.litter_changes_per_month,
        );

        let mut state = Self {
            inputs,
            result: SavingsResult::default(),
            focus: Control::Cats,
            policy,
        };
        state.recompute();
        state
    }

    pub fn inputs(&self) -> &CalculatorInputs {
        &self.inputs
    }

    pub fn result(&self) -> &SavingsResult {
        &self.result
    }

    pub fn focus(&self) -> Control {
        self.focus
    }

    /// Baseline monthly litter cost for the current inputs
    pub fn baseline_cost(&self) -> f64 {
        self.policy
            .table(self.inputs.tier())
            .cost_for(self.inputs.cats_count)
    }

    pub fn icon_grid(&self) -> IconGrid {
        IconGrid::for_trees(self.result.trees_saved)
    }

    /// Old state + event -> new state
    pub fn apply(mut self, event: CalculatorEvent) -> Self {
        let inputs = &mut self.inputs;
        match event {
            CalculatorEvent::Increment => match self.focus {
                Control::Cats => inputs.cats_count = step(inputs.cats_count, 1, MIN_CATS, MAX_CATS),
                Control::Changes => {
                    inputs.litter_changes_per_month =
                        step(inputs.litter_changes_per_month, 1, MIN_CHANGES, MAX_CHANGES)
                }
                Control::Premium => inputs.is_premium_litter = !inputs.is_premium_litter,
            },
            CalculatorEvent::Decrement => match self.focus {
                Control::Cats => inputs.cats_count = step(inputs.cats_count, -1, MIN_CATS, MAX_CATS),
                Control::Changes => {
                    inputs.litter_changes_per_month =
                        step(inputs.litter_changes_per_month, -1, MIN_CHANGES, MAX_CHANGES)
                }
                Control::Premium => inputs.is_premium_litter = !inputs.is_premium_litter,
            },
            CalculatorEvent::SetCats(n) => inputs.cats_count = n.clamp(MIN_CATS, MAX_CATS),
            CalculatorEvent::SetChanges(n) => {
                inputs.litter_changes_per_month = n.clamp(MIN_CHANGES, MAX_CHANGES)
            }
            CalculatorEvent::SetPremium(on) => inputs.is_premium_litter = on,
            CalculatorEvent::TogglePremium => inputs.is_premium_litter = !inputs.is_premium_litter,
            CalculatorEvent::FocusNext => self.focus = self.focus.next(),
            CalculatorEvent::FocusPrev => self.focus = self.focus.prev(),
            CalculatorEvent::Reset => {
                *inputs = CalculatorInputs::default();
                self.focus = Control::Cats;
            }
        }

        self.recompute();
        tracing::debug!(?event, inputs = ?self.inputs, result = ?self.result, "calculator updated");
        self
    }

    fn recompute(&mut self) {
        // Policy was validated in new(), so this only fails if that invariant broke
        self.result = self.policy.compute(&self.inputs).unwrap_or_default();
    }
}

fn step(value: u8, delta: i8, min: u8, max: u8) -> u8 {
    value.saturating_add_signed(delta).clamp(min, max)
}

/// Proportional tree-icon indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconGrid {
    pub count: usize,
}

impl IconGrid {
    /// `min(ceil(trees), 33)` icons
    pub fn for_trees(trees_saved: f64) -> Self {
        let count = if trees_saved.is_finite() && trees_saved > 0.0 {
            (trees_saved.ceil() as usize).min(MAX_TREE_ICONS)
        } else {
            0
        };
        Self { count }
    }

    /// Icon count of each row, full rows first
    pub fn rows(&self) -> Vec<usize> {
        let mut rows = vec![ICONS_PER_ROW; self.count / ICONS_PER_ROW];
        let rest = self.count % ICONS_PER_ROW;
        if rest > 0 {
            rows.push(rest);
        }
        rows
    }
}
