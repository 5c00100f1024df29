//! Pre-flight validation of shader stage sources.
//!
//! Stages are parsed and validated with naga on the CPU. A GPU module is only
//! created for a stage that passes.

use std::fmt;

use rondel_shader::ShaderStage;
use wgpu::naga;

/// Bind group of the shared uniform block.
pub const UNIFORM_GROUP: u32 = 0;
/// Binding slot of the shared uniform block.
pub const UNIFORM_BINDING: u32 = 0;

/// Compile diagnostic for one shader stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderDiagnostic {
    pub stage: ShaderStage,
    pub message: String,
}

impl fmt::Display for ShaderDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to compile {} shader:\n{}", self.stage, self.message)
    }
}

impl std::error::Error for ShaderDiagnostic {}

/// Parses and validates a WGSL stage.
///
/// Checks, in order: WGSL syntax, module validity, an `entry_point` of the
/// matching stage, and (when `needs_uniform`) a uniform variable at
/// `@group(UNIFORM_GROUP) @binding(UNIFORM_BINDING)`.
pub fn validate_stage(
    stage: ShaderStage,
    source: &str,
    entry_point: &str,
    needs_uniform: bool,
) -> Result<(), ShaderDiagnostic> {
    let fail = |message: String| ShaderDiagnostic { stage, message };

    let module = naga::front::wgsl::parse_str(source).map_err(|e| fail(e.emit_to_string(source)))?;

    naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::default(),
    )
    .validate(&module)
    .map_err(|e| fail(error_chain(e.as_inner())))?;

    let naga_stage = match stage {
        ShaderStage::Vertex => naga::ShaderStage::Vertex,
        ShaderStage::Fragment => naga::ShaderStage::Fragment,
    };
    if !module
        .entry_points
        .iter()
        .any(|ep| ep.name == entry_point && ep.stage == naga_stage)
    {
        return Err(fail(format!("no {stage} entry point named `{entry_point}`")));
    }

    if needs_uniform && !declares_uniform(&module) {
        return Err(fail(format!(
            "no uniform declared at @group({UNIFORM_GROUP}) @binding({UNIFORM_BINDING})"
        )));
    }

    Ok(())
}

fn declares_uniform(module: &naga::Module) -> bool {
    module.global_variables.iter().any(|(_, var)| {
        var.space == naga::AddressSpace::Uniform
            && var.binding.as_ref().is_some_and(|b| {
                b.group == UNIFORM_GROUP && b.binding == UNIFORM_BINDING
            })
    })
}

fn error_chain(err: &dyn std::error::Error) -> String {
    let mut out = err.to_string();
    let mut cur = err.source();
    while let Some(e) = cur {
        out.push_str(": ");
        out.push_str(&e.to_string());
        cur = e.source();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const VERTEX: &str = r#"
struct Uniforms {
    color: vec4<f32>,
    offset: vec2<f32>,
};
@group(0) @binding(0) var<uniform> u: Uniforms;

@vertex
fn vs_main(@location(0) pos: vec2<f32>) -> @builtin(position) vec4<f32> {
    return vec4<f32>(pos + u.offset, 0.0, 1.0);
}
"#;

    const FRAGMENT: &str = r#"
struct Uniforms {
    color: vec4<f32>,
    offset: vec2<f32>,
};
@group(0) @binding(0) var<uniform> u: Uniforms;

@fragment
fn fs_main() -> @location(0) vec4<f32> {
    return u.color;
}
"#;

    #[test]
    fn valid_stages_pass() {
        validate_stage(ShaderStage::Vertex, VERTEX, "vs_main", false).unwrap();
        validate_stage(ShaderStage::Fragment, FRAGMENT, "fs_main", true).unwrap();
    }

    #[test]
    fn syntax_error_reports_stage() {
        let err = validate_stage(ShaderStage::Fragment, "fn fs_main( {", "fs_main", true).unwrap_err();
        assert_eq!(err.stage, ShaderStage::Fragment);
        assert!(err.to_string().starts_with("failed to compile fragment shader"));
        assert!(!err.message.is_empty());
    }

    #[test]
    fn wrong_entry_point_name() {
        let err = validate_stage(ShaderStage::Vertex, VERTEX, "main", false).unwrap_err();
        assert!(err.message.contains("main"));
    }

    #[test]
    fn entry_point_of_other_stage_is_rejected() {
        let err = validate_stage(ShaderStage::Vertex, FRAGMENT, "fs_main", false).unwrap_err();
        assert_eq!(err.stage, ShaderStage::Vertex);
    }

    #[test]
    fn missing_uniform_is_reported() {
        let src = "@fragment\nfn fs_main() -> @location(0) vec4<f32> { return vec4<f32>(1.0); }\n";
        validate_stage(ShaderStage::Fragment, src, "fs_main", false).unwrap();
        let err = validate_stage(ShaderStage::Fragment, src, "fs_main", true).unwrap_err();
        assert!(err.message.contains("uniform"));
    }
}
