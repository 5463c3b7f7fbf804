//! Cart Aggregation
//!
//! A customer's cart may span several restaurants. Each restaurant becomes its own
//! order at checkout, so cart lines are grouped by restaurant first, in the order
//! the restaurants were first seen, and each group carries its own subtotal and
//! shipping fee.

use std::{collections::hash_map::Entry, hash::Hash};

use rustc_hash::FxHashMap;
use smallvec::{SmallVec, smallvec};
use thiserror::Error;

/// Errors raised while building restaurant groups.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    /// A group must contain at least one line.
    #[error("restaurant group has no lines")]
    EmptyGroup,

    /// A line belongs to a different restaurant than its group (line index).
    #[error("line {0} belongs to a different restaurant")]
    RestaurantMismatch(usize),

    /// An amount does not fit in 64 bits of minor units.
    #[error("cart amount overflow")]
    AmountOverflow,
}

/// Lines held by a single restaurant group.
pub type GroupLines<I, R> = SmallVec<[CartLine<I, R>; 8]>;

/// A cart line priced from the live menu when the cart was read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine<I, R> {
    /// Menu item
    pub item: I,

    /// Restaurant serving the item
    pub restaurant: R,

    /// Number of units
    pub quantity: u32,

    /// Unit price in minor units
    pub unit_price: u64,
}

impl<I, R> CartLine<I, R> {
    /// Price of the line: unit price times quantity.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::AmountOverflow`] when the product does not fit.
    pub fn line_total(&self) -> Result<u64, CartError> {
        self.unit_price
            .checked_mul(u64::from(self.quantity))
            .ok_or(CartError::AmountOverflow)
    }
}

/// Cart lines for one restaurant, priced and ready to become one order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestaurantCartGroup<I, R> {
    restaurant: R,
    lines: GroupLines<I, R>,
    subtotal: u64,
    shipping_cost: u64,
    total: u64,
}

impl<I, R: PartialEq> RestaurantCartGroup<I, R> {
    /// Build a group, pricing its lines.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] when there are no lines, a line belongs to another
    /// restaurant, or an amount overflows.
    pub fn new(
        restaurant: R,
        lines: impl Into<GroupLines<I, R>>,
        shipping_cost: u64,
    ) -> Result<Self, CartError> {
        let lines = lines.into();

        if lines.is_empty() {
            return Err(CartError::EmptyGroup);
        }

        if let Some(index) = lines.iter().position(|line| line.restaurant != restaurant) {
            return Err(CartError::RestaurantMismatch(index));
        }

        let subtotal = lines.iter().try_fold(0_u64, |acc, line| {
            acc.checked_add(line.line_total()?)
                .ok_or(CartError::AmountOverflow)
        })?;

        let total = subtotal
            .checked_add(shipping_cost)
            .ok_or(CartError::AmountOverflow)?;

        Ok(Self {
            restaurant,
            lines,
            subtotal,
            shipping_cost,
            total,
        })
    }
}

impl<I, R> RestaurantCartGroup<I, R> {
    /// Restaurant the group belongs to.
    pub fn restaurant(&self) -> &R {
        &self.restaurant
    }

    /// Lines in cart order.
    pub fn lines(&self) -> &[CartLine<I, R>] {
        &self.lines
    }

    /// Sum of line totals, excluding shipping.
    pub fn subtotal(&self) -> u64 {
        self.subtotal
    }

    /// Flat shipping fee for this group.
    pub fn shipping_cost(&self) -> u64 {
        self.shipping_cost
    }

    /// Subtotal plus shipping.
    pub fn total(&self) -> u64 {
        self.total
    }
}

/// Restaurant groups for a non-empty cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartAggregate<I, R> {
    groups: Vec<RestaurantCartGroup<I, R>>,
    grand_total: u64,
}

impl<I, R> CartAggregate<I, R> {
    /// Groups in first-seen restaurant order.
    pub fn groups(&self) -> &[RestaurantCartGroup<I, R>] {
        &self.groups
    }

    /// Sum of every group's subtotal and shipping.
    pub fn grand_total(&self) -> u64 {
        self.grand_total
    }

    /// Take ownership of the groups.
    pub fn into_groups(self) -> Vec<RestaurantCartGroup<I, R>> {
        self.groups
    }
}

/// Outcome of aggregating a cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartAggregation<I, R> {
    /// The cart holds no lines; there is nothing to check out.
    Empty,

    /// The cart grouped by restaurant.
    Groups(CartAggregate<I, R>),
}

impl<I, R> CartAggregation<I, R> {
    /// Whether the cart was empty.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

/// Group cart lines by restaurant, preserving the order restaurants first appear.
///
/// # Errors
///
/// Returns [`CartError::AmountOverflow`] when a total does not fit.
pub fn aggregate<I, R>(
    lines: impl IntoIterator<Item = CartLine<I, R>>,
    shipping_cost: u64,
) -> Result<CartAggregation<I, R>, CartError>
where
    R: Copy + Eq + Hash,
{
    let mut positions: FxHashMap<R, usize> = FxHashMap::default();
    let mut grouped: Vec<(R, GroupLines<I, R>)> = Vec::new();

    for line in lines {
        match positions.entry(line.restaurant) {
            Entry::Occupied(entry) => {
                if let Some((_, group_lines)) = grouped.get_mut(*entry.get()) {
                    group_lines.push(line);
                }
            }
            Entry::Vacant(entry) => {
                entry.insert(grouped.len());
                grouped.push((line.restaurant, smallvec![line]));
            }
        }
    }

    if grouped.is_empty() {
        return Ok(CartAggregation::Empty);
    }

    let groups = grouped
        .into_iter()
        .map(|(restaurant, group_lines)| {
            RestaurantCartGroup::new(restaurant, group_lines, shipping_cost)
        })
        .collect::<Result<Vec<_>, _>>()?;

    let grand_total = groups.iter().try_fold(0_u64, |acc, group| {
        acc.checked_add(group.total())
            .ok_or(CartError::AmountOverflow)
    })?;

    Ok(CartAggregation::Groups(CartAggregate {
        groups,
        grand_total,
    }))
}
