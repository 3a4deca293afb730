//! Assertion helpers with diagnostic output.
//!
//! Every failure names the context it was called with and shows expected
//! versus actual state.

use std::collections::BTreeSet;

use sector_types::{CameraPose, Plane, VisibilityMode};
use star_host::{CaptureRecord, HostCall, HostOp, MockHost, SceneHost, SimulationHost};

use crate::helpers::{fail, renamed_bodies, session_depths, HarnessError};

/// Assert the environment holds exactly the parts named `expected`, once each.
pub fn assert_parts_exactly(
    host: &MockHost,
    expected: &[&str],
    ctx: &str,
) -> Result<(), HarnessError> {
    let actual = host.world().part_names();
    let unique: BTreeSet<&str> = actual.iter().copied().collect();
    if unique.len() != actual.len() {
        return Err(fail(ctx, format!("duplicate parts: {actual:?}")));
    }
    let wanted: BTreeSet<&str> = expected.iter().copied().collect();
    if unique != wanted {
        return Err(fail(
            ctx,
            format!("expected parts {wanted:?}, got {unique:?}"),
        ));
    }
    Ok(())
}

/// Assert designs were processed in strictly ascending index order.
pub fn assert_ascending_designs(journal: &[HostCall], ctx: &str) -> Result<(), HarnessError> {
    let names = renamed_bodies(journal);
    let mut previous: Option<u32> = None;
    for name in &names {
        let ordinal = name
            .trim_start_matches(|c: char| !c.is_ascii_digit())
            .parse::<u32>()
            .map_err(|_| fail(ctx, format!("design {name:?} has no index")))?;
        if let Some(prev) = previous {
            if ordinal <= prev {
                return Err(fail(
                    ctx,
                    format!("design order not strictly ascending: {names:?}"),
                ));
            }
        }
        previous = Some(ordinal);
    }
    Ok(())
}

/// Assert no two edit sessions were ever open at once and none is left
/// open before a new session begins or at the end.
pub fn assert_session_discipline(journal: &[HostCall], ctx: &str) -> Result<(), HarnessError> {
    let depths = session_depths(journal);
    for (i, (call, depth)) in journal.iter().zip(&depths).enumerate() {
        if *depth > 1 {
            return Err(fail(
                ctx,
                format!("{depth} sessions open after call #{i} ({:?} {})", call.op, call.detail),
            ));
        }
        if call.op == HostOp::BeginEdit && i > 0 && depths[i - 1] != 0 {
            return Err(fail(
                ctx,
                format!("session begun at call #{i} while another was open"),
            ));
        }
    }
    match depths.last() {
        Some(open) if *open != 0 => Err(fail(ctx, format!("{open} session(s) left open"))),
        _ => Ok(()),
    }
}

/// Assert every transient scene created for a session was removed again.
pub fn assert_no_transient_scene(
    host: &MockHost,
    scene: &str,
    ctx: &str,
) -> Result<(), HarnessError> {
    if host.world().scene_by_name(scene).is_some() {
        return Err(fail(ctx, format!("transient scene {scene:?} still exists")));
    }
    Ok(())
}

/// Assert exactly one displayer inherited visibility at each capture, and
/// that it was the one named after the captured image.
pub fn assert_single_visible(captures: &[CaptureRecord], ctx: &str) -> Result<(), HarnessError> {
    for capture in captures {
        let visible = capture.visible_displayers();
        if visible.len() != 1 {
            return Err(fail(
                ctx,
                format!("capture {} had visible displayers {visible:?}", capture.path),
            ));
        }
        let hidden_ok = capture
            .displayers
            .iter()
            .filter(|(name, _)| name != visible[0])
            .all(|(_, mode)| *mode == VisibilityMode::HideAllParts);
        if !hidden_ok {
            return Err(fail(
                ctx,
                format!("capture {} left a displayer neither hidden nor visible", capture.path),
            ));
        }
        let expected_file = format!("{}.png", visible[0]);
        if !capture.path.ends_with(&expected_file) {
            return Err(fail(
                ctx,
                format!("capture {} showed displayer {}", capture.path, visible[0]),
            ));
        }
    }
    Ok(())
}

/// Assert every capture used a camera bit-identical to `expected`.
pub fn assert_camera_identical(
    captures: &[CaptureRecord],
    expected: &CameraPose,
    ctx: &str,
) -> Result<(), HarnessError> {
    for capture in captures {
        match &capture.camera {
            Some(camera) if camera.bit_identical(expected) => {}
            Some(camera) => {
                return Err(fail(
                    ctx,
                    format!("capture {} used camera {camera:?}", capture.path),
                ))
            }
            None => {
                return Err(fail(
                    ctx,
                    format!("capture {} had no camera set", capture.path),
                ))
            }
        }
    }
    Ok(())
}

/// Assert every part has a section of the same name that lies on `plane`
/// and reads only that part's surfaces.
pub fn assert_sections_on_plane(
    host: &MockHost,
    plane: &Plane,
    ctx: &str,
) -> Result<(), HarnessError> {
    let world = host.world();
    if world.sections.len() != world.parts.len() {
        return Err(fail(
            ctx,
            format!("{} sections for {} parts", world.sections.len(), world.parts.len()),
        ));
    }
    for part in world.parts.values() {
        let id = host
            .find_section(&part.name)
            .map_err(|e| fail(ctx, format!("part {}: {e}", part.name)))?;
        let section = world
            .sections
            .get(&id.0)
            .ok_or_else(|| fail(ctx, format!("section {id} has no record")))?;
        if section.plane != *plane {
            return Err(fail(
                ctx,
                format!("section {} on {:?}, expected {:?}", section.name, section.plane, plane),
            ));
        }
        if section.inputs.is_empty() || !section.inputs.iter().all(|s| part.surfaces.contains(s)) {
            return Err(fail(
                ctx,
                format!("section {} is not bound to part {}", section.name, part.name),
            ));
        }
    }
    Ok(())
}

/// Assert that in `scene` only the displayer named `visible` inherits part
/// visibility and every other part displayer is hidden.
pub fn assert_only_visible(
    host: &MockHost,
    scene: &str,
    visible: &str,
    ctx: &str,
) -> Result<(), HarnessError> {
    let scene_id = host
        .find_scene(scene)
        .map_err(|e| fail(ctx, e))?;
    let displayers = host.part_displayers(scene_id).map_err(|e| fail(ctx, e))?;
    let mut shown = Vec::new();
    for displayer in displayers {
        let name = host.displayer_name(displayer).map_err(|e| fail(ctx, e))?;
        let mode = host.visibility_override(displayer).map_err(|e| fail(ctx, e))?;
        if mode == VisibilityMode::UsePartProperty {
            shown.push(name);
        }
    }
    if shown != [visible] {
        return Err(fail(
            ctx,
            format!("expected only {visible:?} visible in {scene:?}, got {shown:?}"),
        ));
    }
    Ok(())
}
