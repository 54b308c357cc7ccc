use shader_core::{Shader, Sort};

/// Assigns a render-sort bucket to a parsed shader that has none.
///
/// Runs once after parsing:
/// 1. polygon offset without an explicit sort becomes `DECAL`;
/// 2. while the sort is still unset, a blending stage makes the shader
///    `SEE_THROUGH` (stage writes depth) or `BLEND0` (it doesn't), but only
///    when the *first* stage blends as well;
/// 3. anything still unset is `OPAQUE`.
///
/// Step 2 always tests stage 0's blend flag, not the previous stage's.
/// Explicit buckets (portal, sky, fog, `sort`) are never overridden.
pub fn resolve_sort(shader: &mut Shader) {
    if shader.polygon_offset && shader.sort.is_unset() {
        shader.sort = Sort::DECAL;
    }

    let first_blends = shader
        .stages
        .first()
        .is_some_and(|stage| stage.has_blend_func);

    for stage in &shader.stages {
        if first_blends && stage.has_blend_func && shader.sort.is_unset() {
            shader.sort = if stage.depth_write {
                Sort::SEE_THROUGH
            } else {
                Sort::BLEND0
            };
        }
    }

    if shader.sort.is_unset() {
        shader.sort = Sort::OPAQUE;
    }
}
