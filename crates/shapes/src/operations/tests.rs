use super::*;
use crate::codec::decode;
use crate::colors::Color;
use crate::config::QUADRANTS;
use crate::definition::ShapeDefinition;
use crate::sub_shape::{SubShape, SubShapeRegistry};

fn shape(key: &str) -> ShapeDefinition {
    decode(key, &SubShapeRegistry::default()).unwrap_or_else(|e| panic!("{key}: {e}"))
}

// -----------------------------------------------------------------------------
// combine
// -----------------------------------------------------------------------------

#[test]
fn test_combine_disjoint_quadrants_pass_through() {
    let registry = SubShapeRegistry::default();
    let result = combine(&registry, &shape("RuRu----"), &shape("----CuCu"));
    assert_eq!(result.layer_count(), 1);
    assert_eq!(result.hash(), "RuRuCuCu");
}

#[test]
fn test_combine_mixes_colors_and_kinds() {
    let registry = SubShapeRegistry::default();
    let result = combine(&registry, &shape("CrCrCuCg"), &shape("SbCuCb--"));
    let q0 = result.quadrant(0, 0).expect("filled");
    assert_eq!(q0.sub_shape, SubShape::CIRCLE_STAR);
    assert_eq!(q0.color, Color::Purple);
    assert_eq!(result.quadrant(0, 1).expect("filled").color, Color::Red);
    assert_eq!(result.quadrant(0, 2).expect("filled").color, Color::Blue);
    assert_eq!(result.quadrant(0, 3).expect("filled").color, Color::Green);
}

#[test]
fn test_combine_compound_absorbs() {
    let registry = SubShapeRegistry::default();
    let result = combine(&registry, &shape("RuRuRuRu"), &shape("1u1u1u1u"));
    for q in 0..QUADRANTS {
        assert_eq!(result.quadrant(0, q).expect("filled").sub_shape, SubShape::CIRCLE_STAR);
    }
}

#[test]
fn test_combine_with_self_is_identity() {
    let registry = SubShapeRegistry::default();
    for key in ["CrRgSbWy", "2bR_Rb2_:Cb______", "CuCuCuCu:--Sp--Sp"] {
        let x = shape(key);
        assert_eq!(combine(&registry, &x, &x), x, "{key}");
    }
}

#[test]
fn test_combine_keeps_extra_layers() {
    let registry = SubShapeRegistry::default();
    let result = combine(&registry, &shape("CuCuCuCu:RrRrRrRr"), &shape("SuSuSuSu"));
    assert_eq!(result.layer_count(), 2);
    assert_eq!(result.hash(), "1u1u1u1u:RrRrRrRr");
}

#[test]
fn test_combine_does_not_touch_operands() {
    let registry = SubShapeRegistry::default();
    let a = shape("CrCr----");
    let b = shape("SbSb----");
    let _ = combine(&registry, &a, &b);
    assert_eq!(a.hash(), "CrCr----");
    assert_eq!(b.hash(), "SbSb----");
}

#[test]
fn test_links_compatible() {
    assert!(links_compatible(&shape("CuC_----"), &shape("RrR_----")));
    assert!(!links_compatible(&shape("CuC_----"), &shape("RrRr----")));
    // Only overlapping quadrants are compared.
    assert!(links_compatible(&shape("CuC_----"), &shape("----RrR_")));
}

#[test]
fn test_combine_three_links_closes_ring() {
    let registry = SubShapeRegistry::default();
    let result = combine(&registry, &shape("CuC_----"), &shape("--CuC_C_"));
    for q in 0..QUADRANTS {
        let item = result.quadrant(0, q).expect("filled");
        assert!(item.linked_before && item.linked_after, "quadrant {q}");
    }
    assert_eq!(decode(result.hash(), &registry).expect("valid"), result);
}

// -----------------------------------------------------------------------------
// compress
// -----------------------------------------------------------------------------

#[test]
fn test_compress_strips_color_and_links_neighbors() {
    let result = compress(&shape("CrRg--Sb"));
    assert_eq!(result.hash(), "C_R_--Su");
    let q0 = result.quadrant(0, 0).expect("filled");
    assert!(q0.linked_before && q0.linked_after);
    let q1 = result.quadrant(0, 1).expect("filled");
    assert!(q1.linked_before && !q1.linked_after);
}

#[test]
fn test_compress_full_layer_is_circular() {
    let result = compress(&shape("CrCgCbCy"));
    assert_eq!(result.hash(), "Cu______");
}

#[test]
fn test_compress_is_idempotent() {
    for key in ["CrRg--Sb", "CuCuCuCu:--Sp--Sp", "1r------", "2bR_Rb2_:Cb______"] {
        let once = compress(&shape(key));
        assert_eq!(compress(&once), once, "{key}");
    }
}

// -----------------------------------------------------------------------------
// stack
// -----------------------------------------------------------------------------

#[test]
fn test_stack_appends_layers() {
    let result = stack(&shape("CuCuCuCu"), &shape("RrRr----:SbSbSbSb"));
    assert_eq!(result.hash(), "CuCuCuCu:RrRr----:SbSbSbSb");
}

#[test]
fn test_stack_drops_layers_beyond_max() {
    let lower = shape("CuCuCuCu:CuCuCuCu:CuCuCuCu");
    let result = stack(&lower, &shape("RrRrRrRr:SbSbSbSb"));
    assert_eq!(result.layer_count(), 4);
    assert_eq!(result.hash(), "CuCuCuCu:CuCuCuCu:CuCuCuCu:RrRrRrRr");
}

// -----------------------------------------------------------------------------
// cut
// -----------------------------------------------------------------------------

#[test]
fn test_cut_keeps_selected_quadrants() {
    let result = cut_by_quadrants(&shape("CuCuCuCu"), QuadrantSet::from_indices([0, 1]));
    assert_eq!(result.hash(), "CuCu----");
    let q0 = result.quadrant(0, 0).expect("filled");
    let q1 = result.quadrant(0, 1).expect("filled");
    assert!(!q0.linked_before && !q1.linked_after);
}

#[test]
fn test_cut_clears_links_at_boundary() {
    let result = cut_by_quadrants(&shape("Cu______"), QuadrantSet::from_indices([0, 1]));
    assert_eq!(result.hash(), "Cu__----");
    let q0 = result.quadrant(0, 0).expect("filled");
    let q1 = result.quadrant(0, 1).expect("filled");
    assert!(!q0.linked_before && q0.linked_after);
    assert!(q1.linked_before && !q1.linked_after);
}

#[test]
fn test_cut_drops_empty_layers() {
    let result = cut_by_quadrants(&shape("CuCu----:----RrRr"), QuadrantSet::from_indices([0]));
    assert_eq!(result.layer_count(), 1);
    assert_eq!(result.hash(), "Cu------");
}

#[test]
fn test_cut_pair_accounts_for_every_quadrant() {
    let x = shape("CrRg--Sb:2b2b2b2b:--Cu--Cu");
    for bits in 0..16u8 {
        let keep = QuadrantSet::from_indices((0..QUADRANTS).filter(|q| bits & (1 << q) != 0));
        let (kept, removed) = cut_pair(&x, keep);
        assert_eq!(
            kept.filled_quadrants() + removed.filled_quadrants(),
            x.filled_quadrants(),
            "mask {}",
            keep.label()
        );
        let touches_filled = x
            .layers()
            .iter()
            .any(|layer| keep.iter().any(|q| layer[q].is_some()));
        assert_eq!(kept.is_entirely_empty(), !touches_filled, "mask {}", keep.label());
    }
}

#[test]
fn test_quadrant_set() {
    let set = QuadrantSet::from_indices([0, 2, 9]);
    assert!(set.contains(0) && set.contains(2));
    assert!(!set.contains(1) && !set.contains(9));
    assert_eq!(set.len(), 2);
    assert_eq!(set.complement(), QuadrantSet::from_indices([1, 3]));
    assert_eq!(set.label(), "1010");
    assert!(QuadrantSet::NONE.is_empty());
    assert_eq!(QuadrantSet::ALL.complement(), QuadrantSet::NONE);
}

// -----------------------------------------------------------------------------
// paint
// -----------------------------------------------------------------------------

#[test]
fn test_paint_layers() {
    let x = shape("CuCu----:RuRuRuRu");
    let painted = paint_layers(&x, [None, Some(Color::Red), None, Some(Color::Blue)]);
    assert_eq!(painted.hash(), "CuCu----:RrRrRrRr");
    assert_eq!(x.hash(), "CuCu----:RuRuRuRu");
}
