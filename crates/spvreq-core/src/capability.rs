//! Capabilities, extensions and extended instruction sets.
//!
//! The capability enum and its table are generated from one literal so the
//! two cannot drift apart. Each row lists the capability's prerequisites,
//! the extensions that make it legal below its minimum version, and that
//! minimum version.

use crate::table::{EnumTable, Enumerant};
use crate::version::Version;
use std::fmt;

macro_rules! capabilities {
    (@since) => { Version::UNSPECIFIED };
    (@since ($major:literal, $minor:literal)) => { Version::new($major, $minor) };

    ($(
        $name:ident = $id:literal
            $(=> [$($req:ident),*])?
            $(, ext [$($ext:ident),*])?
            $(, since $ver:tt)?
        ;
    )*) => {
        /// A SPIR-V capability, numbered by its `OpCapability` operand.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[repr(u32)]
        pub enum Capability {
            $($name = $id,)*
        }

        /// Every capability, sorted by id.
        pub static CAPABILITIES: EnumTable<Capability> = EnumTable::new("Capability", &[
            $(Enumerant {
                value: Capability::$name,
                name: stringify!($name),
                capabilities: &[$($(Capability::$req),*)?],
                extensions: &[$($(Extension::$ext),*)?],
                min_version: capabilities!(@since $($ver)?),
                max_version: Version::UNSPECIFIED,
            },)*
        ]);
    };
}

capabilities! {
    Matrix = 0;
    Shader = 1 => [Matrix];
    Geometry = 2 => [Shader];
    Tessellation = 3 => [Shader];
    Addresses = 4;
    Linkage = 5;
    Kernel = 6;
    Vector16 = 7 => [Kernel];
    Float16Buffer = 8 => [Kernel];
    Float16 = 9;
    Float64 = 10;
    Int64 = 11;
    Int64Atomics = 12 => [Int64];
    ImageBasic = 13 => [Kernel];
    ImageReadWrite = 14 => [ImageBasic];
    ImageMipmap = 15 => [ImageBasic];
    Pipes = 17 => [Kernel];
    Groups = 18;
    DeviceEnqueue = 19;
    LiteralSampler = 20 => [Kernel];
    AtomicStorage = 21 => [Shader];
    Int16 = 22;
    TessellationPointSize = 23 => [Tessellation];
    GeometryPointSize = 24 => [Geometry];
    ImageGatherExtended = 25 => [Shader];
    StorageImageMultisample = 27 => [Shader];
    UniformBufferArrayDynamicIndexing = 28 => [Shader];
    SampledImageArrayDynamicIndexing = 29 => [Shader];
    ClipDistance = 32 => [Shader];
    CullDistance = 33 => [Shader];
    ImageCubeArray = 34 => [SampledCubeArray];
    SampleRateShading = 35 => [Shader];
    ImageRect = 36 => [SampledRect];
    SampledRect = 37 => [Shader];
    GenericPointer = 38 => [Addresses];
    Int8 = 39;
    InputAttachment = 40 => [Shader];
    SparseResidency = 41 => [Shader];
    MinLod = 42 => [Shader];
    Sampled1D = 43;
    Image1D = 44 => [Sampled1D];
    SampledCubeArray = 45 => [Shader];
    SampledBuffer = 46;
    ImageBuffer = 47 => [SampledBuffer];
    ImageMSArray = 48 => [Shader];
    StorageImageExtendedFormats = 49 => [Shader];
    ImageQuery = 50 => [Shader];
    DerivativeControl = 51 => [Shader];
    InterpolationFunction = 52 => [Shader];
    TransformFeedback = 53 => [Shader];
    GeometryStreams = 54 => [Geometry];
    StorageImageReadWithoutFormat = 55 => [Shader];
    StorageImageWriteWithoutFormat = 56 => [Shader];
    MultiViewport = 57 => [Geometry];
    SubgroupDispatch = 58 => [DeviceEnqueue], since (1, 1);
    NamedBarrier = 59 => [Kernel], since (1, 1);
    PipeStorage = 60 => [Pipes], since (1, 1);
    GroupNonUniform = 61, since (1, 3);
    GroupNonUniformVote = 62 => [GroupNonUniform], since (1, 3);
    GroupNonUniformArithmetic = 63 => [GroupNonUniform], since (1, 3);
    GroupNonUniformBallot = 64 => [GroupNonUniform], since (1, 3);
    GroupNonUniformShuffle = 65 => [GroupNonUniform], since (1, 3);
    GroupNonUniformShuffleRelative = 66 => [GroupNonUniform], since (1, 3);
    GroupNonUniformClustered = 67 => [GroupNonUniform], since (1, 3);
    GroupNonUniformQuad = 68 => [GroupNonUniform], since (1, 3);
    SubgroupBallotKHR = 4423, ext [KhrShaderBallot];
    DrawParameters = 4427 => [Shader], ext [KhrShaderDrawParameters], since (1, 3);
    SubgroupVoteKHR = 4431, ext [KhrSubgroupVote];
    StorageBuffer16BitAccess = 4433, ext [Khr16bitStorage], since (1, 3);
    StorageUniform16 = 4434 => [StorageBuffer16BitAccess], ext [Khr16bitStorage], since (1, 3);
    StoragePushConstant16 = 4435, ext [Khr16bitStorage], since (1, 3);
    StorageInputOutput16 = 4436, ext [Khr16bitStorage], since (1, 3);
    DeviceGroup = 4437, ext [KhrDeviceGroup], since (1, 3);
    MultiView = 4439 => [Shader], ext [KhrMultiview], since (1, 3);
    VariablePointersStorageBuffer = 4441 => [Shader], ext [KhrVariablePointers], since (1, 3);
    VariablePointers = 4442 => [VariablePointersStorageBuffer], ext [KhrVariablePointers], since (1, 3);
    AtomicStorageOps = 4445, ext [KhrShaderAtomicCounterOps];
    SampleMaskPostDepthCoverage = 4447, ext [KhrPostDepthCoverage];
    StorageBuffer8BitAccess = 4448, ext [Khr8bitStorage];
    UniformAndStorageBuffer8BitAccess = 4449 => [StorageBuffer8BitAccess], ext [Khr8bitStorage];
    StoragePushConstant8 = 4450, ext [Khr8bitStorage];
    DenormPreserve = 4464, ext [KhrFloatControls], since (1, 4);
    DenormFlushToZero = 4465, ext [KhrFloatControls], since (1, 4);
    SignedZeroInfNanPreserve = 4466, ext [KhrFloatControls], since (1, 4);
    RoundingModeRTE = 4467, ext [KhrFloatControls], since (1, 4);
    RoundingModeRTZ = 4468, ext [KhrFloatControls], since (1, 4);
    Float16ImageAMD = 5008 => [Shader];
    ImageGatherBiasLodAMD = 5009 => [Shader];
    FragmentMaskAMD = 5010 => [Shader];
    StencilExportEXT = 5013 => [Shader];
    ImageReadWriteLodAMD = 5015 => [Shader];
    SampleMaskOverrideCoverageNV = 5249 => [SampleRateShading];
    GeometryShaderPassthroughNV = 5251 => [Geometry];
    ShaderViewportIndexLayerEXT = 5254 => [MultiViewport];
    ShaderViewportMaskNV = 5255 => [ShaderViewportIndexLayerEXT];
    ShaderStereoViewNV = 5259 => [ShaderViewportMaskNV];
    PerViewAttributesNV = 5260 => [MultiView];
    FragmentFullyCoveredEXT = 5265 => [Shader];
    MeshShadingNV = 5266 => [Shader];
    ImageFootprintNV = 5282;
    FragmentBarycentricNV = 5284;
    ComputeDerivativeGroupQuadsNV = 5288;
    FragmentDensityEXT = 5291 => [Shader];
    GroupNonUniformPartitionedNV = 5297;
    ShaderNonUniformEXT = 5301 => [Shader];
    RuntimeDescriptorArrayEXT = 5302 => [Shader];
    InputAttachmentArrayDynamicIndexingEXT = 5303 => [InputAttachment];
    UniformTexelBufferArrayDynamicIndexingEXT = 5304 => [SampledBuffer];
    StorageTexelBufferArrayDynamicIndexingEXT = 5305 => [ImageBuffer];
    UniformBufferArrayNonUniformIndexingEXT = 5306 => [ShaderNonUniformEXT];
    SampledImageArrayNonUniformIndexingEXT = 5307 => [ShaderNonUniformEXT];
    StorageBufferArrayNonUniformIndexingEXT = 5308 => [ShaderNonUniformEXT];
    StorageImageArrayNonUniformIndexingEXT = 5309 => [ShaderNonUniformEXT];
    InputAttachmentArrayNonUniformIndexingEXT = 5310 => [InputAttachment, ShaderNonUniformEXT];
    UniformTexelBufferArrayNonUniformIndexingEXT = 5311 => [SampledBuffer, ShaderNonUniformEXT];
    StorageTexelBufferArrayNonUniformIndexingEXT = 5312 => [ImageBuffer, ShaderNonUniformEXT];
    RayTracingNV = 5340 => [Shader];
    VulkanMemoryModelKHR = 5345;
    VulkanMemoryModelDeviceScopeKHR = 5346;
    PhysicalStorageBufferAddresses = 5347 => [Shader];
    ComputeDerivativeGroupLinearNV = 5350;
    CooperativeMatrixNV = 5357 => [Shader];
    SubgroupShuffleINTEL = 5568;
    SubgroupBufferBlockIOINTEL = 5569;
    SubgroupImageBlockIOINTEL = 5570;
    SubgroupImageMediaBlockIOINTEL = 5579;
    SubgroupAvcMotionEstimationINTEL = 5696;
    SubgroupAvcMotionEstimationIntraINTEL = 5697;
    SubgroupAvcMotionEstimationChromaINTEL = 5698;
}

impl Capability {
    pub fn id(self) -> u32 {
        self as u32
    }

    pub fn from_id(id: u32) -> Option<Capability> {
        CAPABILITIES.get(id).map(|e| e.value)
    }

    pub fn from_name(name: &str) -> Option<Capability> {
        CAPABILITIES.by_name(name).map(|e| e.value)
    }

    pub fn all() -> impl Iterator<Item = Capability> {
        CAPABILITIES.entries().iter().map(|e| e.value)
    }

    pub fn name(self) -> &'static str {
        self.row().name
    }

    pub(crate) fn row(self) -> &'static Enumerant<Capability> {
        match CAPABILITIES.get(self.id()) {
            Some(row) => row,
            // Every variant is generated together with its row.
            None => unreachable!("capability {} has no table row", self.id()),
        }
    }
}

impl From<Capability> for u32 {
    fn from(cap: Capability) -> u32 {
        cap.id()
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An optional SPIR-V extension, named by its `OpExtension` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Extension {
    KhrShaderBallot,
    KhrShaderDrawParameters,
    KhrSubgroupVote,
    Khr16bitStorage,
    KhrDeviceGroup,
    KhrMultiview,
    KhrVariablePointers,
    KhrShaderAtomicCounterOps,
    KhrPostDepthCoverage,
    Khr8bitStorage,
    KhrFloatControls,
    KhrNoIntegerWrapDecoration,
    AmdShaderTrinaryMinmax,
}

impl Extension {
    pub const ALL: &'static [Extension] = &[
        Extension::KhrShaderBallot,
        Extension::KhrShaderDrawParameters,
        Extension::KhrSubgroupVote,
        Extension::Khr16bitStorage,
        Extension::KhrDeviceGroup,
        Extension::KhrMultiview,
        Extension::KhrVariablePointers,
        Extension::KhrShaderAtomicCounterOps,
        Extension::KhrPostDepthCoverage,
        Extension::Khr8bitStorage,
        Extension::KhrFloatControls,
        Extension::KhrNoIntegerWrapDecoration,
        Extension::AmdShaderTrinaryMinmax,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Extension::KhrShaderBallot => "SPV_KHR_shader_ballot",
            Extension::KhrShaderDrawParameters => "SPV_KHR_shader_draw_parameters",
            Extension::KhrSubgroupVote => "SPV_KHR_subgroup_vote",
            Extension::Khr16bitStorage => "SPV_KHR_16bit_storage",
            Extension::KhrDeviceGroup => "SPV_KHR_device_group",
            Extension::KhrMultiview => "SPV_KHR_multiview",
            Extension::KhrVariablePointers => "SPV_KHR_variable_pointers",
            Extension::KhrShaderAtomicCounterOps => "SPV_KHR_shader_atomic_counter_ops",
            Extension::KhrPostDepthCoverage => "SPV_KHR_post_depth_coverage",
            Extension::Khr8bitStorage => "SPV_KHR_8bit_storage",
            Extension::KhrFloatControls => "SPV_KHR_float_controls",
            Extension::KhrNoIntegerWrapDecoration => "SPV_KHR_no_integer_wrap_decoration",
            Extension::AmdShaderTrinaryMinmax => "SPV_AMD_shader_trinary_minmax",
        }
    }

    pub fn from_name(name: &str) -> Option<Extension> {
        Self::ALL.iter().copied().find(|ext| ext.name() == name)
    }
}

impl fmt::Display for Extension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Extended instruction sets importable with `OpExtInstImport`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExtInstSet {
    OpenClStd,
    GlslStd450,
    AmdShaderTrinaryMinmax,
}

impl ExtInstSet {
    pub const ALL: &'static [ExtInstSet] = &[
        ExtInstSet::OpenClStd,
        ExtInstSet::GlslStd450,
        ExtInstSet::AmdShaderTrinaryMinmax,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ExtInstSet::OpenClStd => "OpenCL.std",
            ExtInstSet::GlslStd450 => "GLSL.std.450",
            ExtInstSet::AmdShaderTrinaryMinmax => "SPV_AMD_shader_trinary_minmax",
        }
    }

    pub fn from_name(name: &str) -> Option<ExtInstSet> {
        Self::ALL.iter().copied().find(|set| set.name() == name)
    }

    /// The extension that must be enabled for the set to be importable.
    pub fn required_extension(self) -> Option<Extension> {
        match self {
            ExtInstSet::AmdShaderTrinaryMinmax => Some(Extension::AmdShaderTrinaryMinmax),
            _ => None,
        }
    }
}

impl fmt::Display for ExtInstSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
