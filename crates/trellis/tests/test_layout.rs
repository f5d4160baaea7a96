//! Integration tests for layout of random and hand-built widget trees.

#[cfg(test)]
mod tests {
    use rand::{Rng, SeedableRng, rngs::StdRng};
    use trellis::{
        Core, NodeId, Result,
        geom::{Axis, Margins, Point, Rect, Size},
        layout::Align,
        widgets::{Alignment, Label, LayoutBox, Spacing},
    };

    const ALIGNS: [Align; 4] = [Align::Unchanged, Align::Begin, Align::Center, Align::End];

    fn random_align(rng: &mut StdRng) -> Align {
        ALIGNS[rng.random_range(0..ALIGNS.len())]
    }

    fn random_leaf(core: &mut Core, rng: &mut StdRng) -> Result<NodeId> {
        let size = Size::new(rng.random_range(0..60), rng.random_range(0..20));
        let id: NodeId = if rng.random_bool(0.5) {
            core.create_detached(Label::new("leaf", size)).into()
        } else {
            core.create_detached(Spacing::new(size)).into()
        };
        for axis in Axis::ALL {
            if rng.random_bool(0.3) {
                core.set_stretchable(id, axis, true)?;
            }
        }
        Ok(id)
    }

    fn random_tree(core: &mut Core, rng: &mut StdRng, depth: usize) -> Result<NodeId> {
        if depth == 0 || rng.random_bool(0.25) {
            return random_leaf(core, rng);
        }
        if rng.random_bool(0.5) {
            let margins = Margins::new(
                rng.random_range(0..12),
                rng.random_range(0..12),
                rng.random_range(0..12),
                rng.random_range(0..12),
            );
            let min = if rng.random_bool(0.2) {
                (rng.random_range(0..80), rng.random_range(0..30))
            } else {
                (0, 0)
            };
            let a = core.create_detached(
                Alignment::new(random_align(rng), random_align(rng))
                    .with_margins(margins)
                    .with_min_size(min.0, min.1),
            );
            let child = random_tree(core, rng, depth - 1)?;
            core.attach(a, child)?;
            Ok(a.into())
        } else {
            let b: NodeId = if rng.random_bool(0.5) {
                core.create_detached(LayoutBox::horizontal()).into()
            } else {
                core.create_detached(LayoutBox::vertical()).into()
            };
            for _ in 0..rng.random_range(1..5) {
                let child = random_tree(core, rng, depth - 1)?;
                core.attach(b, child)?;
            }
            Ok(b)
        }
    }

    fn check_subtree(core: &Core, root: NodeId) -> Result<()> {
        for id in core.subtree_pre_order(root) {
            let Some(node) = core.node(id) else {
                continue;
            };
            let bounds = Rect::new(Point::zero(), node.rect().size);
            for child in node.children() {
                let rect = core.rect(*child)?;
                assert!(
                    bounds.contains_rect(&rect),
                    "child {rect:?} escapes parent {bounds:?}"
                );
            }
            if let Ok(a) = core.widget::<Alignment>(id) {
                let Some(child) = node.children().first() else {
                    continue;
                };
                let rect = core.rect(*child)?;
                for axis in Axis::ALL {
                    let allotted = bounds.size.along(axis);
                    let preferred = core.preferred_size(*child, axis)?;
                    let m = a.margins();
                    if allotted >= preferred + m.total(axis) {
                        assert!(rect.tl.along(axis) >= m.leading(axis));
                        assert!(rect.far(axis) + u64::from(m.trailing(axis)) <= u64::from(allotted));
                    } else if allotted < preferred {
                        assert_eq!(rect.tl.along(axis), 0);
                        assert_eq!(rect.size.along(axis), allotted);
                    }
                }
            }
        }
        Ok(())
    }

    #[test]
    fn random_trees_stay_inside_their_parents() -> Result<()> {
        let mut rng = StdRng::seed_from_u64(0x7e11);
        for _ in 0..200 {
            let mut core = Core::new();
            let root = random_tree(&mut core, &mut rng, 5)?;
            let is_container = core
                .node(root)
                .is_some_and(|n| n.widget().kind().is_container());
            if !is_container {
                continue;
            }
            for size in [
                core.preferred(root)?,
                Size::new(rng.random_range(0..300), rng.random_range(0..300)),
            ] {
                core.set_size(root, size)?;
                assert_eq!(core.rect(root)?.size, size);
                check_subtree(&core, root)?;
            }
        }
        Ok(())
    }

    #[test]
    fn relayout_is_deterministic() -> Result<()> {
        let mut rng = StdRng::seed_from_u64(42);
        let mut core = Core::new();
        let root = loop {
            let root = random_tree(&mut core, &mut rng, 4)?;
            if core.node(root).is_some_and(|n| !n.children().is_empty()) {
                break root;
            }
        };
        core.set_size(root, Size::new(120, 80))?;
        let first: Vec<Rect> = core
            .subtree_pre_order(root)
            .into_iter()
            .map(|id| core.rect(id))
            .collect::<Result<_>>()?;
        core.set_size(root, Size::new(10, 10))?;
        core.set_size(root, Size::new(120, 80))?;
        let second: Vec<Rect> = core
            .subtree_pre_order(root)
            .into_iter()
            .map(|id| core.rect(id))
            .collect::<Result<_>>()?;
        assert_eq!(first, second);
        Ok(())
    }

    #[test]
    fn stretchable_child_takes_space_between_margins() -> Result<()> {
        let mut core = Core::new();
        let a = core.create_detached(
            Alignment::new(Align::Unchanged, Align::Unchanged).with_margins(Margins::new(10, 10, 3, 5)),
        );
        let l = core.add_child(a, Label::new("wide", Size::new(100, 10)))?;
        core.set_stretchable(l, Axis::Horizontal, true)?;
        core.set_stretchable(l, Axis::Vertical, true)?;
        assert!(core.stretchable(a, Axis::Horizontal)?);

        core.set_size(a, Size::new(140, 40))?;
        assert_eq!(core.rect(l)?, Rect::from_coords(10, 3, 120, 32));
        Ok(())
    }

    #[test]
    fn margins_shrink_before_the_child() -> Result<()> {
        let mut core = Core::new();
        let a = core.create_detached(
            Alignment::new(Align::Center, Align::Begin).with_margins(Margins::new(10, 30, 0, 0)),
        );
        let l = core.add_child(a, Label::new("x", Size::new(100, 10)))?;
        core.set_size(a, Size::new(110, 10))?;
        assert_eq!(core.rect(l)?, Rect::from_coords(3, 0, 100, 10));
        Ok(())
    }
}
