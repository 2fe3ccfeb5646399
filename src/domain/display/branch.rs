//! Branch selection for the display value.
//!
//! The branches are an ordered decision table of `(predicate, handler)`
//! rules. The first rule whose predicate holds renders the value; the last
//! rule always applies.
//!
//! | # | Branch      | Applies when                                                        |
//! |---|-------------|---------------------------------------------------------------------|
//! | 1 | `Literal`   | a non-empty pre-formatted display value was supplied                |
//! | 2 | `Native`    | currency == native currency, or (not preferred && no native currency) |
//! | 3 | `Converted` | currency == preferred currency and a rate is available              |
//! | 4 | `Unresolved`| otherwise                                                           |

use serde::Serialize;

use super::{ConversionRequest, CurrencyDisplay, CurrencySettings};
use crate::domain::rate::{value_from_smallest_unit_hex, DEFAULT_CURRENCY_DECIMALS};
use crate::error::DisplayError;
use crate::shared::{Denomination, DEFAULT_NATIVE_DECIMALS};

/// Which rule produced the display value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayBranch {
    /// Caller-supplied display value, returned unchanged.
    Literal,
    /// Amount shown in a denomination of the native asset.
    Native,
    /// Amount converted into the user's preferred currency.
    Converted,
    /// No branch could produce a value.
    Unresolved,
}

impl std::fmt::Display for DisplayBranch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Literal => "literal",
            Self::Native => "native",
            Self::Converted => "converted",
            Self::Unresolved => "unresolved",
        };
        write!(f, "{}", name)
    }
}

/// Everything a rule may look at. Borrowed for the duration of one call.
pub(crate) struct BranchContext<'a> {
    pub formatter: &'a CurrencyDisplay,
    pub request: &'a ConversionRequest,
    pub settings: &'a CurrencySettings,
}

impl BranchContext<'_> {
    fn is_user_preferred_currency(&self) -> bool {
        self.request.currency.as_ref() == Some(&self.settings.current_currency)
    }
}

type Predicate = fn(&BranchContext<'_>) -> bool;
type Handler = fn(&BranchContext<'_>) -> Result<Option<String>, DisplayError>;

pub(crate) struct Rule {
    pub branch: DisplayBranch,
    pub applies: Predicate,
    pub render: Handler,
}

pub(crate) static RULES: [Rule; 4] = [
    Rule {
        branch: DisplayBranch::Literal,
        applies: has_literal,
        render: render_literal,
    },
    Rule {
        branch: DisplayBranch::Native,
        applies: wants_native,
        render: render_native,
    },
    Rule {
        branch: DisplayBranch::Converted,
        applies: wants_converted,
        render: render_converted,
    },
    Rule {
        branch: DisplayBranch::Unresolved,
        applies: always,
        render: render_unresolved,
    },
];

/// First rule whose predicate holds; the last rule is the fallback.
pub(crate) fn select(ctx: &BranchContext<'_>) -> &'static Rule {
    RULES
        .iter()
        .find(|rule| (rule.applies)(ctx))
        .unwrap_or(&RULES[RULES.len() - 1])
}

// ─── Predicates ──────────────────────────────────────────────────────────────

fn has_literal(ctx: &BranchContext<'_>) -> bool {
    ctx.request
        .display_value
        .as_deref()
        .is_some_and(|v| !v.is_empty())
}

fn wants_native(ctx: &BranchContext<'_>) -> bool {
    ctx.request.currency == ctx.settings.native_currency
        || (!ctx.is_user_preferred_currency() && ctx.settings.native_currency.is_none())
}

fn wants_converted(ctx: &BranchContext<'_>) -> bool {
    ctx.is_user_preferred_currency() && ctx.settings.conversion_rate.is_some()
}

fn always(_: &BranchContext<'_>) -> bool {
    true
}

// ─── Handlers ────────────────────────────────────────────────────────────────

fn render_literal(ctx: &BranchContext<'_>) -> Result<Option<String>, DisplayError> {
    Ok(ctx.request.display_value.clone())
}

/// Requested precision, where zero means "use the default".
fn requested_decimals(ctx: &BranchContext<'_>) -> Option<u32> {
    ctx.request.number_of_decimals.filter(|d| *d != 0)
}

fn render_native(ctx: &BranchContext<'_>) -> Result<Option<String>, DisplayError> {
    let decimals = requested_decimals(ctx).unwrap_or(DEFAULT_NATIVE_DECIMALS);
    let value = ctx.formatter.denominations().convert_for_display(
        &ctx.request.input_value,
        Denomination::Wei,
        ctx.request.denomination.unwrap_or_default(),
        decimals,
    )?;
    Ok(Some(value))
}

fn render_converted(ctx: &BranchContext<'_>) -> Result<Option<String>, DisplayError> {
    let (Some(rate), Some(currency)) = (&ctx.settings.conversion_rate, &ctx.request.currency)
    else {
        return Ok(None);
    };

    let currency_formatter = ctx.formatter.currency_formatter();
    let decimals = requested_decimals(ctx)
        .or_else(|| currency_formatter.default_decimals(currency))
        .unwrap_or(DEFAULT_CURRENCY_DECIMALS);

    let value = value_from_smallest_unit_hex(
        ctx.formatter.denominations(),
        &ctx.request.input_value,
        ctx.request.denomination.unwrap_or_default(),
        rate,
        decimals,
    )?;
    Ok(Some(currency_formatter.format(&value, currency, decimals)))
}

fn render_unresolved(ctx: &BranchContext<'_>) -> Result<Option<String>, DisplayError> {
    tracing::debug!(
        "No display value for currency {:?} (preferred: {}, native: {:?}, rate available: {})",
        ctx.request.currency,
        ctx.settings.current_currency,
        ctx.settings.native_currency,
        ctx.settings.conversion_rate.is_some()
    );
    Ok(None)
}
