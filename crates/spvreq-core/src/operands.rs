//! Operand families whose values carry capability requirements.
//!
//! Rows follow the SPIR-V grammar. A row with several capabilities accepts
//! any one of them. Values missing from a table require nothing.

use crate::capability::{Capability as C, Extension};
use crate::table::{EnumTable, Enumerant};
use crate::version::Version;

const fn e(value: u32, name: &'static str, caps: &'static [C]) -> Enumerant<u32> {
    Enumerant::new(value, name, caps)
}

pub const DIM_1D: u32 = 0;
pub const DIM_2D: u32 = 1;
pub const DIM_CUBE: u32 = 3;
pub const DIM_RECT: u32 = 4;
pub const DIM_BUFFER: u32 = 5;
pub const DIM_SUBPASS_DATA: u32 = 6;

pub const ACCESS_READ_WRITE: u32 = 2;

pub const DECORATION_BUILT_IN: u32 = 11;

/// `Sampled` operand of `OpTypeImage`: 2 means the image is used without a sampler.
pub const SAMPLED_NO_SAMPLER: u32 = 2;

pub static ADDRESSING_MODEL: EnumTable<u32> = EnumTable::new(
    "AddressingModel",
    &[
        e(0, "Logical", &[]),
        e(1, "Physical32", &[C::Addresses]),
        e(2, "Physical64", &[C::Addresses]),
        e(5348, "PhysicalStorageBuffer64", &[C::PhysicalStorageBufferAddresses]),
    ],
);

pub static MEMORY_MODEL: EnumTable<u32> = EnumTable::new(
    "MemoryModel",
    &[
        e(0, "Simple", &[C::Shader]),
        e(1, "GLSL450", &[C::Shader]),
        e(2, "OpenCL", &[C::Kernel]),
        e(3, "VulkanKHR", &[C::VulkanMemoryModelKHR]),
    ],
);

pub static EXECUTION_MODEL: EnumTable<u32> = EnumTable::new(
    "ExecutionModel",
    &[
        e(0, "Vertex", &[C::Shader]),
        e(1, "TessellationControl", &[C::Tessellation]),
        e(2, "TessellationEvaluation", &[C::Tessellation]),
        e(3, "Geometry", &[C::Geometry]),
        e(4, "Fragment", &[C::Shader]),
        e(5, "GLCompute", &[C::Shader]),
        e(6, "Kernel", &[C::Kernel]),
        e(5267, "TaskNV", &[C::MeshShadingNV]),
        e(5268, "MeshNV", &[C::MeshShadingNV]),
        e(5313, "RayGenerationNV", &[C::RayTracingNV]),
        e(5314, "IntersectionNV", &[C::RayTracingNV]),
        e(5315, "AnyHitNV", &[C::RayTracingNV]),
        e(5316, "ClosestHitNV", &[C::RayTracingNV]),
        e(5317, "MissNV", &[C::RayTracingNV]),
        e(5318, "CallableNV", &[C::RayTracingNV]),
    ],
);

pub static EXECUTION_MODE: EnumTable<u32> = EnumTable::new(
    "ExecutionMode",
    &[
        e(0, "Invocations", &[C::Geometry]),
        e(1, "SpacingEqual", &[C::Tessellation]),
        e(2, "SpacingFractionalEven", &[C::Tessellation]),
        e(3, "SpacingFractionalOdd", &[C::Tessellation]),
        e(4, "VertexOrderCw", &[C::Tessellation]),
        e(5, "VertexOrderCcw", &[C::Tessellation]),
        e(6, "PixelCenterInteger", &[C::Shader]),
        e(7, "OriginUpperLeft", &[C::Shader]),
        e(8, "OriginLowerLeft", &[C::Shader]),
        e(9, "EarlyFragmentTests", &[C::Shader]),
        e(10, "PointMode", &[C::Tessellation]),
        e(11, "Xfb", &[C::TransformFeedback]),
        e(12, "DepthReplacing", &[C::Shader]),
        e(14, "DepthGreater", &[C::Shader]),
        e(15, "DepthLess", &[C::Shader]),
        e(16, "DepthUnchanged", &[C::Shader]),
        e(17, "LocalSize", &[]),
        e(18, "LocalSizeHint", &[C::Kernel]),
        e(19, "InputPoints", &[C::Geometry]),
        e(20, "InputLines", &[C::Geometry]),
        e(21, "InputLinesAdjacency", &[C::Geometry]),
        e(22, "Triangles", &[C::Geometry, C::Tessellation]),
        e(23, "InputTrianglesAdjacency", &[C::Geometry]),
        e(24, "Quads", &[C::Tessellation]),
        e(25, "Isolines", &[C::Tessellation]),
        e(26, "OutputVertices", &[C::Geometry, C::Tessellation, C::MeshShadingNV]),
        e(27, "OutputPoints", &[C::Geometry, C::MeshShadingNV]),
        e(28, "OutputLineStrip", &[C::Geometry]),
        e(29, "OutputTriangleStrip", &[C::Geometry]),
        e(30, "VecTypeHint", &[C::Kernel]),
        e(31, "ContractionOff", &[C::Kernel]),
        e(33, "Initializer", &[C::Kernel]),
        e(34, "Finalizer", &[C::Kernel]),
        e(35, "SubgroupSize", &[C::SubgroupDispatch]),
        e(36, "SubgroupsPerWorkgroup", &[C::SubgroupDispatch]),
        e(37, "SubgroupsPerWorkgroupId", &[C::SubgroupDispatch]),
        e(38, "LocalSizeId", &[]),
        e(39, "LocalSizeHintId", &[C::Kernel]),
        e(4446, "PostDepthCoverage", &[C::SampleMaskPostDepthCoverage]),
        e(4459, "DenormPreserve", &[C::DenormPreserve]),
        e(4460, "DenormFlushToZero", &[C::DenormFlushToZero]),
        e(4461, "SignedZeroInfNanPreserve", &[C::SignedZeroInfNanPreserve]),
        e(4462, "RoundingModeRTE", &[C::RoundingModeRTE]),
        e(4463, "RoundingModeRTZ", &[C::RoundingModeRTZ]),
        e(5027, "StencilRefReplacingEXT", &[C::StencilExportEXT]),
        e(5269, "OutputLinesNV", &[C::MeshShadingNV]),
        e(5289, "DerivativeGroupQuadsNV", &[C::ComputeDerivativeGroupQuadsNV]),
        e(5290, "DerivativeGroupLinearNV", &[C::ComputeDerivativeGroupLinearNV]),
        e(5298, "OutputTrianglesNV", &[C::MeshShadingNV]),
    ],
);

pub static STORAGE_CLASS: EnumTable<u32> = EnumTable::new(
    "StorageClass",
    &[
        e(0, "UniformConstant", &[]),
        e(1, "Input", &[]),
        e(2, "Uniform", &[C::Shader]),
        e(3, "Output", &[C::Shader]),
        e(4, "Workgroup", &[]),
        e(5, "CrossWorkgroup", &[]),
        e(6, "Private", &[C::Shader]),
        e(7, "Function", &[]),
        e(8, "Generic", &[C::GenericPointer]),
        e(9, "PushConstant", &[C::Shader]),
        e(10, "AtomicCounter", &[C::AtomicStorage]),
        e(11, "Image", &[]),
        e(12, "StorageBuffer", &[C::Shader]),
        e(5328, "CallableDataNV", &[C::RayTracingNV]),
        e(5329, "IncomingCallableDataNV", &[C::RayTracingNV]),
        e(5338, "RayPayloadNV", &[C::RayTracingNV]),
        e(5339, "HitAttributeNV", &[C::RayTracingNV]),
        e(5342, "IncomingRayPayloadNV", &[C::RayTracingNV]),
        e(5343, "ShaderRecordBufferNV", &[C::RayTracingNV]),
        e(5349, "PhysicalStorageBuffer", &[C::PhysicalStorageBufferAddresses]),
    ],
);

pub static IMAGE_FORMAT: EnumTable<u32> = EnumTable::new(
    "ImageFormat",
    &[
        e(0, "Unknown", &[]),
        e(1, "Rgba32f", &[C::Shader]),
        e(2, "Rgba16f", &[C::Shader]),
        e(3, "R32f", &[C::Shader]),
        e(4, "Rgba8", &[C::Shader]),
        e(5, "Rgba8Snorm", &[C::Shader]),
        e(6, "Rg32f", &[C::StorageImageExtendedFormats]),
        e(7, "Rg16f", &[C::StorageImageExtendedFormats]),
        e(8, "R11fG11fB10f", &[C::StorageImageExtendedFormats]),
        e(9, "R16f", &[C::StorageImageExtendedFormats]),
        e(10, "Rgba16", &[C::StorageImageExtendedFormats]),
        e(11, "Rgb10A2", &[C::StorageImageExtendedFormats]),
        e(12, "Rg16", &[C::StorageImageExtendedFormats]),
        e(13, "Rg8", &[C::StorageImageExtendedFormats]),
        e(14, "R16", &[C::StorageImageExtendedFormats]),
        e(15, "R8", &[C::StorageImageExtendedFormats]),
        e(16, "Rgba16Snorm", &[C::StorageImageExtendedFormats]),
        e(17, "Rg16Snorm", &[C::StorageImageExtendedFormats]),
        e(18, "Rg8Snorm", &[C::StorageImageExtendedFormats]),
        e(19, "R16Snorm", &[C::StorageImageExtendedFormats]),
        e(20, "R8Snorm", &[C::StorageImageExtendedFormats]),
        e(21, "Rgba32i", &[C::Shader]),
        e(22, "Rgba16i", &[C::Shader]),
        e(23, "Rgba8i", &[C::Shader]),
        e(24, "R32i", &[C::Shader]),
        e(25, "Rg32i", &[C::StorageImageExtendedFormats]),
        e(26, "Rg16i", &[C::StorageImageExtendedFormats]),
        e(27, "Rg8i", &[C::StorageImageExtendedFormats]),
        e(28, "R16i", &[C::StorageImageExtendedFormats]),
        e(29, "R8i", &[C::StorageImageExtendedFormats]),
        e(30, "Rgba32ui", &[C::Shader]),
        e(31, "Rgba16ui", &[C::Shader]),
        e(32, "Rgba8ui", &[C::Shader]),
        e(33, "R32ui", &[C::Shader]),
        e(34, "Rgb10a2ui", &[C::StorageImageExtendedFormats]),
        e(35, "Rg32ui", &[C::StorageImageExtendedFormats]),
        e(36, "Rg16ui", &[C::StorageImageExtendedFormats]),
        e(37, "Rg8ui", &[C::StorageImageExtendedFormats]),
        e(38, "R16ui", &[C::StorageImageExtendedFormats]),
        e(39, "R8ui", &[C::StorageImageExtendedFormats]),
    ],
);

pub static DECORATION: EnumTable<u32> = EnumTable::new(
    "Decoration",
    &[
        e(0, "RelaxedPrecision", &[C::Shader]),
        e(1, "SpecId", &[C::Shader, C::Kernel]),
        e(2, "Block", &[C::Shader]),
        e(3, "BufferBlock", &[C::Shader]),
        e(4, "RowMajor", &[C::Matrix]),
        e(5, "ColMajor", &[C::Matrix]),
        e(6, "ArrayStride", &[C::Shader]),
        e(7, "MatrixStride", &[C::Matrix]),
        e(8, "GLSLShared", &[C::Shader]),
        e(9, "GLSLPacked", &[C::Shader]),
        e(10, "CPacked", &[C::Kernel]),
        e(DECORATION_BUILT_IN, "BuiltIn", &[]),
        e(13, "NoPerspective", &[C::Shader]),
        e(14, "Flat", &[C::Shader]),
        e(15, "Patch", &[C::Tessellation]),
        e(16, "Centroid", &[C::Shader]),
        e(17, "Sample", &[C::SampleRateShading]),
        e(18, "Invariant", &[C::Shader]),
        e(19, "Restrict", &[]),
        e(20, "Aliased", &[]),
        e(21, "Volatile", &[]),
        e(22, "Constant", &[C::Kernel]),
        e(23, "Coherent", &[]),
        e(24, "NonWritable", &[]),
        e(25, "NonReadable", &[]),
        e(26, "Uniform", &[C::Shader]),
        e(27, "UniformId", &[C::Shader]),
        e(28, "SaturatedConversion", &[C::Kernel]),
        e(29, "Stream", &[C::GeometryStreams]),
        e(30, "Location", &[C::Shader]),
        e(31, "Component", &[C::Shader]),
        e(32, "Index", &[C::Shader]),
        e(33, "Binding", &[C::Shader]),
        e(34, "DescriptorSet", &[C::Shader]),
        e(35, "Offset", &[C::Shader]),
        e(36, "XfbBuffer", &[C::TransformFeedback]),
        e(37, "XfbStride", &[C::TransformFeedback]),
        e(38, "FuncParamAttr", &[C::Kernel]),
        e(39, "FPRoundingMode", &[]),
        e(40, "FPFastMathMode", &[C::Kernel]),
        e(41, "LinkageAttributes", &[C::Linkage]),
        e(42, "NoContraction", &[C::Shader]),
        e(43, "InputAttachmentIndex", &[C::InputAttachment]),
        e(44, "Alignment", &[C::Kernel]),
        e(45, "MaxByteOffset", &[C::Addresses]),
        e(46, "AlignmentId", &[C::Kernel]),
        e(47, "MaxByteOffsetId", &[C::Addresses]),
        e(4469, "NoSignedWrap", &[])
            .extensions(&[Extension::KhrNoIntegerWrapDecoration])
            .since(Version::new(1, 4)),
        e(4470, "NoUnsignedWrap", &[])
            .extensions(&[Extension::KhrNoIntegerWrapDecoration])
            .since(Version::new(1, 4)),
        e(4999, "ExplicitInterpAMD", &[]),
        e(5248, "OverrideCoverageNV", &[C::SampleMaskOverrideCoverageNV]),
        e(5250, "PassthroughNV", &[C::GeometryShaderPassthroughNV]),
        e(5252, "ViewportRelativeNV", &[C::ShaderViewportMaskNV]),
        e(5256, "SecondaryViewportRelativeNV", &[C::ShaderStereoViewNV]),
        e(5271, "PerPrimitiveNV", &[C::MeshShadingNV]),
        e(5272, "PerViewNV", &[C::MeshShadingNV]),
        e(5273, "PerVertexNV", &[C::FragmentBarycentricNV]),
        e(5300, "NonUniformEXT", &[C::ShaderNonUniformEXT]),
        e(5355, "RestrictPointer", &[C::PhysicalStorageBufferAddresses]),
        e(5356, "AliasedPointer", &[C::PhysicalStorageBufferAddresses]),
        e(5634, "CountBuffer", &[]),
        e(5635, "UserSemantic", &[]),
    ],
);

pub static BUILT_IN: EnumTable<u32> = EnumTable::new(
    "BuiltIn",
    &[
        e(0, "Position", &[C::Shader]),
        e(1, "PointSize", &[C::Shader]),
        e(3, "ClipDistance", &[C::ClipDistance]),
        e(4, "CullDistance", &[C::CullDistance]),
        e(5, "VertexId", &[C::Shader]),
        e(6, "InstanceId", &[C::Shader]),
        e(7, "PrimitiveId", &[C::Geometry, C::Tessellation, C::RayTracingNV]),
        e(8, "InvocationId", &[C::Geometry, C::Tessellation]),
        e(9, "Layer", &[C::Geometry]),
        e(10, "ViewportIndex", &[C::MultiViewport]),
        e(11, "TessLevelOuter", &[C::Tessellation]),
        e(12, "TessLevelInner", &[C::Tessellation]),
        e(13, "TessCoord", &[C::Tessellation]),
        e(14, "PatchVertices", &[C::Tessellation]),
        e(15, "FragCoord", &[C::Shader]),
        e(16, "PointCoord", &[C::Shader]),
        e(17, "FrontFacing", &[C::Shader]),
        e(18, "SampleId", &[C::SampleRateShading]),
        e(19, "SamplePosition", &[C::SampleRateShading]),
        e(20, "SampleMask", &[C::Shader]),
        e(22, "FragDepth", &[C::Shader]),
        e(23, "HelperInvocation", &[C::Shader]),
        e(24, "NumWorkGroups", &[]),
        e(25, "WorkgroupSize", &[]),
        e(26, "WorkgroupId", &[]),
        e(27, "LocalInvocationId", &[]),
        e(28, "GlobalInvocationId", &[]),
        e(29, "LocalInvocationIndex", &[]),
        e(30, "WorkDim", &[C::Kernel]),
        e(31, "GlobalSize", &[C::Kernel]),
        e(32, "EnqueuedWorkgroupSize", &[C::Kernel]),
        e(33, "GlobalOffset", &[C::Kernel]),
        e(34, "GlobalLinearId", &[C::Kernel]),
        e(36, "SubgroupSize", &[C::Kernel, C::GroupNonUniform, C::SubgroupBallotKHR]),
        e(37, "SubgroupMaxSize", &[C::Kernel]),
        e(38, "NumSubgroups", &[C::Kernel, C::GroupNonUniform]),
        e(39, "NumEnqueuedSubgroups", &[C::Kernel]),
        e(40, "SubgroupId", &[C::Kernel, C::GroupNonUniform]),
        e(41, "SubgroupLocalInvocationId", &[C::Kernel, C::GroupNonUniform, C::SubgroupBallotKHR]),
        e(42, "VertexIndex", &[C::Shader]),
        e(43, "InstanceIndex", &[C::Shader]),
        e(4416, "SubgroupEqMask", &[C::SubgroupBallotKHR, C::GroupNonUniformBallot]),
        e(4417, "SubgroupGeMask", &[C::SubgroupBallotKHR, C::GroupNonUniformBallot]),
        e(4418, "SubgroupGtMask", &[C::SubgroupBallotKHR, C::GroupNonUniformBallot]),
        e(4419, "SubgroupLeMask", &[C::SubgroupBallotKHR, C::GroupNonUniformBallot]),
        e(4420, "SubgroupLtMask", &[C::SubgroupBallotKHR, C::GroupNonUniformBallot]),
        e(4424, "BaseVertex", &[C::DrawParameters]),
        e(4425, "BaseInstance", &[C::DrawParameters]),
        e(4426, "DrawIndex", &[C::DrawParameters, C::MeshShadingNV]),
        e(4438, "DeviceIndex", &[C::DeviceGroup]),
        e(4440, "ViewIndex", &[C::MultiView]),
        e(4492, "BaryCoordNoPerspAMD", &[]),
        e(4493, "BaryCoordNoPerspCentroidAMD", &[]),
        e(4494, "BaryCoordNoPerspSampleAMD", &[]),
        e(4495, "BaryCoordSmoothAMD", &[]),
        e(4496, "BaryCoordSmoothCentroid", &[]),
        e(4497, "BaryCoordSmoothSample", &[]),
        e(4498, "BaryCoordPullModel", &[]),
        e(5014, "FragStencilRefEXT", &[C::StencilExportEXT]),
        e(5253, "ViewportMaskNV", &[C::ShaderViewportMaskNV, C::MeshShadingNV]),
        e(5257, "SecondaryPositionNV", &[C::ShaderStereoViewNV]),
        e(5258, "SecondaryViewportMaskNV", &[C::ShaderStereoViewNV]),
        e(5261, "PositionPerViewNV", &[C::PerViewAttributesNV, C::MeshShadingNV]),
        e(5262, "ViewportMaskPerViewNV", &[C::PerViewAttributesNV, C::MeshShadingNV]),
        e(5264, "FullyCoveredEXT", &[C::FragmentFullyCoveredEXT]),
        e(5274, "TaskCountNV", &[C::MeshShadingNV]),
        e(5275, "PrimitiveCountNV", &[C::MeshShadingNV]),
        e(5276, "PrimitiveIndicesNV", &[C::MeshShadingNV]),
        e(5277, "ClipDistancePerViewNV", &[C::MeshShadingNV]),
        e(5278, "CullDistancePerViewNV", &[C::MeshShadingNV]),
        e(5279, "LayerPerViewNV", &[C::MeshShadingNV]),
        e(5280, "MeshViewCountNV", &[C::MeshShadingNV]),
        e(5281, "MeshViewIndices", &[C::MeshShadingNV]),
        e(5286, "BaryCoordNV", &[C::FragmentBarycentricNV]),
        e(5287, "BaryCoordNoPerspNV", &[C::FragmentBarycentricNV]),
        e(5292, "FragSizeEXT", &[C::FragmentDensityEXT]),
        e(5293, "FragInvocationCountEXT", &[C::FragmentDensityEXT]),
        e(5319, "LaunchIdNV", &[C::RayTracingNV]),
        e(5320, "LaunchSizeNV", &[C::RayTracingNV]),
        e(5321, "WorldRayOriginNV", &[C::RayTracingNV]),
        e(5322, "WorldRayDirectionNV", &[C::RayTracingNV]),
        e(5323, "ObjectRayOriginNV", &[C::RayTracingNV]),
        e(5324, "ObjectRayDirectionNV", &[C::RayTracingNV]),
        e(5325, "RayTminNV", &[C::RayTracingNV]),
        e(5326, "RayTmaxNV", &[C::RayTracingNV]),
        e(5327, "InstanceCustomIndexNV", &[C::RayTracingNV]),
        e(5330, "ObjectToWorldNV", &[C::RayTracingNV]),
        e(5331, "WorldToObjectNV", &[C::RayTracingNV]),
        e(5332, "HitTNV", &[C::RayTracingNV]),
        e(5333, "HitKindNV", &[C::RayTracingNV]),
        e(5351, "IncomingRayFlagsNV", &[C::RayTracingNV]),
    ],
);

/// Names an operand family, so rules can refer to tables as plain data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    AddressingModel,
    MemoryModel,
    ExecutionModel,
    ExecutionMode,
    StorageClass,
    ImageFormat,
    Decoration,
    BuiltIn,
}

impl Family {
    pub const ALL: &'static [Family] = &[
        Family::AddressingModel,
        Family::MemoryModel,
        Family::ExecutionModel,
        Family::ExecutionMode,
        Family::StorageClass,
        Family::ImageFormat,
        Family::Decoration,
        Family::BuiltIn,
    ];

    pub fn table(self) -> &'static EnumTable<u32> {
        match self {
            Family::AddressingModel => &ADDRESSING_MODEL,
            Family::MemoryModel => &MEMORY_MODEL,
            Family::ExecutionModel => &EXECUTION_MODEL,
            Family::ExecutionMode => &EXECUTION_MODE,
            Family::StorageClass => &STORAGE_CLASS,
            Family::ImageFormat => &IMAGE_FORMAT,
            Family::Decoration => &DECORATION,
            Family::BuiltIn => &BUILT_IN,
        }
    }
}
