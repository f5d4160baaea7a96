//! Size negotiation arithmetic.
//!
//! Layout runs in two passes, independently per axis. The bottom-up pass asks
//! every node for its preferred size; the top-down pass hands each node an
//! allotted size and lets it place its children. The functions here hold the
//! per-axis arithmetic that containers use during the top-down pass.

use serde::{Deserialize, Serialize};

/// Alignment of a child within the space its container was given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    /// Keep the child's own stretch behavior and place it at the start.
    #[default]
    Unchanged,
    /// Left or top.
    Begin,
    /// Centered.
    Center,
    /// Right or bottom.
    End,
}

/// A one-dimensional placement: offset from the container origin, and extent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    /// Offset from the container's origin.
    pub offset: u32,
    /// Extent of the child.
    pub size: u32,
}

/// Inputs for placing a single child with margins along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisRequest {
    /// Space the container was given.
    pub allotted: u32,
    /// Child preferred size.
    pub preferred: u32,
    /// Margin before the child.
    pub leading: u32,
    /// Margin after the child.
    pub trailing: u32,
    /// Whether the child should take all space left after margins.
    pub stretch: bool,
    /// Alignment of the child in any surplus.
    pub align: Align,
}

/// Place one child with margins along one axis.
///
/// With room for the child and both margins, a stretching child fills the
/// space between the margins and any other child keeps its preferred size,
/// aligned within the surplus. With room for the child but not the margins,
/// the margins shrink in proportion to each other and the leading margin
/// absorbs the rounding remainder. Without room for the child, the margins
/// collapse and the child takes everything.
pub fn distribute(req: AxisRequest) -> Span {
    let margins = req.leading.saturating_add(req.trailing);
    let (size, leading, margins) = if req.allotted >= req.preferred.saturating_add(margins) {
        let size = if req.stretch {
            req.allotted - margins
        } else {
            req.preferred
        };
        (size, req.leading, margins)
    } else if req.allotted >= req.preferred {
        let remaining = req.allotted - req.preferred;
        let trailing = if margins == 0 {
            0
        } else {
            (u64::from(remaining) * u64::from(req.trailing) / u64::from(margins)) as u32
        };
        (req.preferred, remaining - trailing, remaining)
    } else {
        (req.allotted, 0, 0)
    };

    let free = req.allotted.saturating_sub(size).saturating_sub(margins);
    let pos = match req.align {
        Align::Unchanged | Align::Begin => 0,
        Align::Center => free / 2,
        Align::End => free,
    };
    Span {
        offset: pos + leading,
        size,
    }
}

/// Split `total` across `weights` in proportion, so that the parts sum to
/// exactly `total` whenever any weight is non-zero.
///
/// Units left over from integer division go to the largest remainders, with
/// ties broken by position.
pub fn allocate_shares(total: u32, weights: &[u32]) -> Vec<u32> {
    let sum: u64 = weights.iter().map(|w| u64::from(*w)).sum();
    if total == 0 || sum == 0 {
        return vec![0; weights.len()];
    }

    let mut base = Vec::with_capacity(weights.len());
    let mut rem = Vec::with_capacity(weights.len());
    for w in weights {
        let prod = u64::from(total) * u64::from(*w);
        base.push((prod / sum) as u32);
        rem.push(prod % sum);
    }

    let used: u32 = base.iter().sum();
    let extra = total.saturating_sub(used);
    if extra == 0 {
        return base;
    }

    let mut idx: Vec<usize> = (0..weights.len()).filter(|i| weights[*i] > 0).collect();
    idx.sort_by(|a, b| rem[*b].cmp(&rem[*a]).then_with(|| a.cmp(b)));
    for i in idx.into_iter().take(extra as usize) {
        base[i] = base[i].saturating_add(1);
    }
    base
}

/// Lay out a run of children along a primary axis.
///
/// `preferred` holds each child's preferred size and `stretch` whether it
/// may grow. Surplus space is shared evenly between stretching children;
/// a shortfall shrinks every child in proportion to its preferred size.
pub fn distribute_run(allotted: u32, preferred: &[u32], stretch: &[bool]) -> Vec<Span> {
    let wanted: u64 = preferred.iter().map(|p| u64::from(*p)).sum();
    let sizes = if u64::from(allotted) >= wanted {
        let surplus = allotted - wanted as u32;
        let weights: Vec<u32> = stretch.iter().map(|s| u32::from(*s)).collect();
        let shares = allocate_shares(surplus, &weights);
        preferred
            .iter()
            .zip(shares)
            .map(|(p, s)| p.saturating_add(s))
            .collect()
    } else {
        allocate_shares(allotted, preferred)
    };

    let mut offset = 0u32;
    sizes
        .into_iter()
        .map(|size| {
            let span = Span { offset, size };
            offset = offset.saturating_add(size);
            span
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn req(allotted: u32, align: Align, stretch: bool) -> AxisRequest {
        AxisRequest {
            allotted,
            preferred: 100,
            leading: 10,
            trailing: 10,
            stretch,
            align,
        }
    }

    #[test]
    fn full_space_alignment() {
        assert_eq!(
            distribute(req(140, Align::Center, false)),
            Span {
                offset: 20,
                size: 100
            }
        );
        assert_eq!(distribute(req(140, Align::Begin, false)).offset, 10);
        assert_eq!(distribute(req(140, Align::Unchanged, false)).offset, 10);
        assert_eq!(distribute(req(140, Align::End, false)).offset, 30);
    }

    #[test]
    fn full_space_stretch() {
        assert_eq!(
            distribute(req(140, Align::Center, true)),
            Span {
                offset: 10,
                size: 120
            }
        );
    }

    #[test]
    fn margins_shrink_proportionally() {
        let span = distribute(AxisRequest {
            allotted: 110,
            preferred: 100,
            leading: 10,
            trailing: 30,
            stretch: false,
            align: Align::Begin,
        });
        // 10 units for 40 units of margin, 1:3, trailing floored.
        assert_eq!(span, Span { offset: 3, size: 100 });

        let span = distribute(AxisRequest {
            allotted: 101,
            preferred: 100,
            leading: 1,
            trailing: 1,
            stretch: true,
            align: Align::End,
        });
        assert_eq!(span, Span { offset: 1, size: 100 });
    }

    #[test]
    fn odd_remainder_goes_leading() {
        let span = distribute(AxisRequest {
            allotted: 107,
            preferred: 100,
            leading: 5,
            trailing: 5,
            stretch: false,
            align: Align::Center,
        });
        assert_eq!(span, Span { offset: 4, size: 100 });
    }

    #[test]
    fn too_small_collapses_margins() {
        assert_eq!(
            distribute(req(95, Align::Center, false)),
            Span {
                offset: 0,
                size: 95
            }
        );
        assert_eq!(distribute(req(0, Align::End, true)), Span::default());
    }

    #[test]
    fn shares_sum_to_total() {
        assert_eq!(allocate_shares(10, &[1, 1, 1]), vec![4, 3, 3]);
        assert_eq!(allocate_shares(7, &[0, 1, 0]), vec![0, 7, 0]);
        assert_eq!(allocate_shares(7, &[0, 0]), vec![0, 0]);
        assert_eq!(allocate_shares(0, &[3, 4]), vec![0, 0]);
        assert_eq!(allocate_shares(9, &[]), Vec::<u32>::new());
    }

    #[test]
    fn run_surplus_goes_to_stretchers() {
        let spans = distribute_run(100, &[10, 20, 10], &[false, true, true]);
        let sizes: Vec<u32> = spans.iter().map(|s| s.size).collect();
        assert_eq!(sizes, vec![10, 50, 40]);
        let offsets: Vec<u32> = spans.iter().map(|s| s.offset).collect();
        assert_eq!(offsets, vec![0, 10, 60]);
    }

    #[test]
    fn run_shortfall_shrinks_proportionally() {
        let spans = distribute_run(20, &[10, 30], &[false, false]);
        let sizes: Vec<u32> = spans.iter().map(|s| s.size).collect();
        assert_eq!(sizes, vec![5, 15]);
    }

    proptest! {
        #[test]
        fn distribute_never_overflows(
            allotted in 0u32..1000,
            preferred in 0u32..1000,
            leading in 0u32..200,
            trailing in 0u32..200,
            stretch in any::<bool>(),
            align in prop_oneof![
                Just(Align::Unchanged),
                Just(Align::Begin),
                Just(Align::Center),
                Just(Align::End),
            ],
        ) {
            let r = AxisRequest { allotted, preferred, leading, trailing, stretch, align };
            let span = distribute(r);
            prop_assert!(span.offset + span.size <= allotted);
            if allotted < preferred {
                prop_assert_eq!(span, Span { offset: 0, size: allotted });
            } else if allotted >= preferred + leading + trailing {
                if stretch {
                    prop_assert_eq!(span.size, allotted - leading - trailing);
                } else {
                    prop_assert_eq!(span.size, preferred);
                }
                if align == Align::Center {
                    let free = allotted - span.size - leading - trailing;
                    let expect = leading + free / 2;
                    prop_assert!(span.offset.abs_diff(expect) <= 1);
                }
            } else {
                prop_assert_eq!(span.size, preferred);
            }
        }

        #[test]
        fn run_never_overflows(
            allotted in 0u32..500,
            items in proptest::collection::vec((0u32..200, any::<bool>()), 0..8),
        ) {
            let preferred: Vec<u32> = items.iter().map(|i| i.0).collect();
            let stretch: Vec<bool> = items.iter().map(|i| i.1).collect();
            let spans = distribute_run(allotted, &preferred, &stretch);
            let used: u64 = spans.iter().map(|s| u64::from(s.size)).sum();
            prop_assert!(used <= u64::from(allotted));
            for pair in spans.windows(2) {
                prop_assert_eq!(pair[0].offset + pair[0].size, pair[1].offset);
            }
        }
    }
}
