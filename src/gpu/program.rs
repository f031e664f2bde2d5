//! WGSL program compilation and name reflection.
//!
//! Sources are parsed and validated with naga, so compile errors surface
//! before any GPU object exists. Attribute locations come from the vertex
//! entry point's `@location` arguments; uniform locations come from
//! `var<uniform>` globals in bind group 0 of either stage.

use std::collections::BTreeMap;
use std::fmt;

use glam::Mat4;

use super::backend::{AttribLocation, ProgramHandle, UniformLocation};
use crate::geometry::Color;

/// Pipeline stage a shader source belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    /// Vertex stage.
    Vertex,
    /// Fragment stage.
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vertex => write!(f, "vertex"),
            Self::Fragment => write!(f, "fragment"),
        }
    }
}

/// Program compilation or link failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    /// WGSL syntax error.
    Parse {
        /// Stage whose source failed.
        stage: ShaderStage,
        /// Rendered diagnostic.
        message: String,
    },
    /// The module parsed but failed naga validation.
    Validation {
        /// Stage whose source failed.
        stage: ShaderStage,
        /// Rendered diagnostic.
        message: String,
    },
    /// The source has no entry point for its stage.
    MissingEntryPoint(ShaderStage),
    /// The two stages disagree on a shared uniform, or a uniform lives
    /// outside bind group 0.
    Link(String),
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse { stage, message } => {
                write!(f, "{stage} shader parse error: {message}")
            }
            Self::Validation { stage, message } => {
                write!(f, "{stage} shader validation error: {message}")
            }
            Self::MissingEntryPoint(stage) => {
                write!(f, "no @{stage} entry point")
            }
            Self::Link(msg) => write!(f, "program link error: {msg}"),
        }
    }
}

impl std::error::Error for CompileError {}

/// A uniform declared by a program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniformSlot {
    /// Variable name in the WGSL source.
    pub name: String,
    /// `@binding` index within group 0.
    pub binding: u32,
    /// Size of the uniform's type in bytes.
    pub size: u32,
}

/// A validated vertex + fragment module pair and its reflected names.
#[derive(Debug, Clone)]
pub struct CompiledProgram {
    /// Vertex-stage IR.
    pub vertex: naga::Module,
    /// Fragment-stage IR.
    pub fragment: naga::Module,
    /// Vertex entry point name.
    pub vertex_entry: String,
    /// Fragment entry point name.
    pub fragment_entry: String,
    /// Vertex inputs by name → `@location`.
    attributes: BTreeMap<String, u32>,
    /// Uniform slots, sorted by binding.
    uniforms: Vec<UniformSlot>,
}

impl CompiledProgram {
    /// Parse, validate, and link the two sources.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError`] describing the first failure.
    pub fn compile(
        vertex_source: &str,
        fragment_source: &str,
    ) -> Result<Self, CompileError> {
        let vertex = parse_stage(vertex_source, ShaderStage::Vertex)?;
        let fragment = parse_stage(fragment_source, ShaderStage::Fragment)?;

        let vertex_ep = find_entry(&vertex, naga::ShaderStage::Vertex)
            .ok_or(CompileError::MissingEntryPoint(ShaderStage::Vertex))?;
        let fragment_ep = find_entry(&fragment, naga::ShaderStage::Fragment)
            .ok_or(CompileError::MissingEntryPoint(ShaderStage::Fragment))?;

        let attributes = vertex_ep
            .function
            .arguments
            .iter()
            .filter_map(|arg| match (&arg.name, &arg.binding) {
                (Some(name), Some(naga::Binding::Location { location, .. })) => {
                    Some((name.clone(), *location))
                }
                _ => None,
            })
            .collect();

        let mut uniforms: BTreeMap<String, UniformSlot> = BTreeMap::new();
        for slot in uniform_slots(&vertex)?.into_iter().chain(uniform_slots(&fragment)?) {
            match uniforms.get(&slot.name) {
                Some(existing) if *existing != slot => {
                    return Err(CompileError::Link(format!(
                        "uniform `{}` declared differently in the two stages",
                        slot.name
                    )));
                }
                Some(_) => {}
                None => {
                    let _ = uniforms.insert(slot.name.clone(), slot);
                }
            }
        }
        let mut uniforms: Vec<UniformSlot> = uniforms.into_values().collect();
        uniforms.sort_by_key(|slot| slot.binding);
        if let Some(pair) =
            uniforms.windows(2).find(|w| w[0].binding == w[1].binding)
        {
            return Err(CompileError::Link(format!(
                "uniforms `{}` and `{}` share binding {}",
                pair[0].name, pair[1].name, pair[0].binding
            )));
        }

        let vertex_entry = vertex_ep.name.clone();
        let fragment_entry = fragment_ep.name.clone();
        Ok(Self {
            vertex,
            fragment,
            vertex_entry,
            fragment_entry,
            attributes,
            uniforms,
        })
    }

    /// Location of a named vertex input.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<u32> {
        self.attributes.get(name).copied()
    }

    /// Every vertex input location the program declares.
    pub fn attribute_locations(&self) -> impl Iterator<Item = u32> + '_ {
        self.attributes.values().copied()
    }

    /// Uniform slots sorted by binding.
    #[must_use]
    pub fn uniforms(&self) -> &[UniformSlot] {
        &self.uniforms
    }

    /// Slot declared with `binding`.
    #[must_use]
    pub fn uniform_at(&self, binding: u32) -> Option<&UniformSlot> {
        self.uniforms.iter().find(|slot| slot.binding == binding)
    }
}

fn parse_stage(
    source: &str,
    stage: ShaderStage,
) -> Result<naga::Module, CompileError> {
    let module = naga::front::wgsl::parse_str(source).map_err(|e| {
        CompileError::Parse {
            stage,
            message: e.emit_to_string(source),
        }
    })?;
    let _info = naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::default(),
    )
    .validate(&module)
    .map_err(|e| CompileError::Validation {
        stage,
        message: e.emit_to_string(source),
    })?;
    Ok(module)
}

fn find_entry(
    module: &naga::Module,
    stage: naga::ShaderStage,
) -> Option<&naga::EntryPoint> {
    module.entry_points.iter().find(|ep| ep.stage == stage)
}

fn uniform_slots(module: &naga::Module) -> Result<Vec<UniformSlot>, CompileError> {
    let mut slots = Vec::new();
    for (_, var) in module.global_variables.iter() {
        if var.space != naga::AddressSpace::Uniform {
            continue;
        }
        let (Some(name), Some(binding)) = (&var.name, &var.binding) else {
            continue;
        };
        if binding.group != 0 {
            return Err(CompileError::Link(format!(
                "uniform `{name}` must live in group 0, found group {}",
                binding.group
            )));
        }
        slots.push(UniformSlot {
            name: name.clone(),
            binding: binding.binding,
            size: module.types[var.ty].inner.size(module.to_ctx()),
        });
    }
    Ok(slots)
}

/// A uniform value as uploaded by the frame renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    /// Column-major 4×4 matrix.
    Mat4(Mat4),
    /// RGBA color.
    Color(Color),
}

impl UniformValue {
    /// Size of the value's GPU representation in bytes.
    #[must_use]
    pub fn size(&self) -> u32 {
        match self {
            Self::Mat4(_) => 64,
            Self::Color(_) => 16,
        }
    }

    /// Raw bytes as laid out in a uniform buffer.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            Self::Mat4(m) => bytemuck::cast_slice(&m.to_cols_array()).to_vec(),
            Self::Color(c) => bytemuck::cast_slice(&c.to_array()).to_vec(),
        }
    }
}

/// Compiled programs plus the bind and uniform state shared by every
/// backend.
#[derive(Debug, Default)]
pub struct ProgramTable {
    programs: Vec<CompiledProgram>,
    /// Current uniform values per program, keyed by binding.
    values: Vec<BTreeMap<u32, UniformValue>>,
    bound: Option<ProgramHandle>,
}

impl ProgramTable {
    /// Register a compiled program.
    pub fn insert(&mut self, program: CompiledProgram) -> ProgramHandle {
        self.programs.push(program);
        self.values.push(BTreeMap::new());
        ProgramHandle(self.programs.len() - 1)
    }

    /// The compiled program behind `handle`.
    #[must_use]
    pub fn get(&self, handle: ProgramHandle) -> Option<&CompiledProgram> {
        self.programs.get(handle.0)
    }

    /// Number of registered programs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.programs.len()
    }

    /// Whether no program is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.programs.is_empty()
    }

    /// Resolve a vertex attribute name.
    #[must_use]
    pub fn attribute_location(
        &self,
        handle: ProgramHandle,
        name: &str,
    ) -> AttribLocation {
        match self.get(handle).and_then(|p| p.attribute(name)) {
            Some(location) => AttribLocation::new(location),
            None => {
                log::warn!("attribute `{name}` not found in program {handle:?}");
                AttribLocation::INVALID
            }
        }
    }

    /// Resolve a uniform name.
    #[must_use]
    pub fn uniform_location(
        &self,
        handle: ProgramHandle,
        name: &str,
    ) -> UniformLocation {
        let slot = self
            .get(handle)
            .and_then(|p| p.uniforms().iter().find(|s| s.name == name));
        match slot {
            Some(slot) => UniformLocation::new(slot.binding),
            None => {
                log::warn!("uniform `{name}` not found in program {handle:?}");
                UniformLocation::INVALID
            }
        }
    }

    /// Bind `handle`; returns `false` (and stays unbound) for an unknown
    /// handle.
    pub fn bind(&mut self, handle: ProgramHandle) -> bool {
        if self.get(handle).is_none() {
            log::warn!("bind of unknown program {handle:?}");
            self.bound = None;
            return false;
        }
        self.bound = Some(handle);
        true
    }

    /// Unbind the current program.
    pub fn release(&mut self) {
        self.bound = None;
    }

    /// The currently bound program.
    #[must_use]
    pub fn bound(&self) -> Option<ProgramHandle> {
        self.bound
    }

    /// Store a uniform value on the bound program.
    ///
    /// Returns `false` without storing when nothing is bound, the location
    /// is invalid, or the value does not match the slot's size.
    pub fn set_uniform(
        &mut self,
        location: UniformLocation,
        value: UniformValue,
    ) -> bool {
        let (Some(handle), Some(binding)) = (self.bound, location.index())
        else {
            return false;
        };
        let Some(slot) = self.get(handle).and_then(|p| p.uniform_at(binding))
        else {
            return false;
        };
        if slot.size != value.size() {
            log::warn!(
                "uniform `{}` is {} bytes, refusing {}-byte value",
                slot.name,
                slot.size,
                value.size()
            );
            return false;
        }
        let _ = self.values[handle.0].insert(binding, value);
        true
    }

    /// Current value of a uniform slot, if ever set.
    #[must_use]
    pub fn uniform_value(
        &self,
        handle: ProgramHandle,
        binding: u32,
    ) -> Option<UniformValue> {
        self.values.get(handle.0)?.get(&binding).copied()
    }
}
