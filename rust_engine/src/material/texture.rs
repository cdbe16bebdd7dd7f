//! 纹理格式、用途和标志

/// 纹理像素格式
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextureFormat {
    #[default]
    Dxt1,
    Dxt3,
    Dxt5,
    Ati1,
    Ati2,
    Bc7,
    A1R5G5B5,
    A1R8G8B8,
    A8R8G8B8,
    A8B8G8R8,
    A8,
    L8,
}

impl TextureFormat {
    /// 解析格式名，允许带 `D3DFMT_` 前缀
    pub fn parse(value: &str) -> Option<Self> {
        let name = value.strip_prefix("D3DFMT_").unwrap_or(value);
        let format = match name {
            "DXT1" => TextureFormat::Dxt1,
            "DXT3" => TextureFormat::Dxt3,
            "DXT5" => TextureFormat::Dxt5,
            "ATI1" => TextureFormat::Ati1,
            "ATI2" => TextureFormat::Ati2,
            "BC7" => TextureFormat::Bc7,
            "A1R5G5B5" => TextureFormat::A1R5G5B5,
            "A1R8G8B8" => TextureFormat::A1R8G8B8,
            "A8R8G8B8" => TextureFormat::A8R8G8B8,
            "A8B8G8R8" => TextureFormat::A8B8G8R8,
            "A8" => TextureFormat::A8,
            "L8" => TextureFormat::L8,
            _ => return None,
        };
        Some(format)
    }
}

/// 纹理用途
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextureUsage {
    #[default]
    Unknown,
    Default,
    Terrain,
    CloudDensity,
    CloudNormal,
    Cable,
    Fence,
    EnvEff,
    Script,
    WaterFlow,
    WaterFoam,
    WaterFog,
    WaterOcean,
    Water,
    FoamOpacity,
    Foam,
    DiffuseMipSharpen,
    DiffuseDetail,
    DiffuseDark,
    DiffuseAlphaOpaque,
    Diffuse,
    Detail,
    Normal,
    Specular,
    Emissive,
    TintPalette,
    SkipProcessing,
    DoNotOptimize,
    Test,
    Count,
}

impl TextureUsage {
    pub fn parse(value: &str) -> Option<Self> {
        let usage = match value {
            "UNKNOWN" => TextureUsage::Unknown,
            "DEFAULT" => TextureUsage::Default,
            "TERRAIN" => TextureUsage::Terrain,
            "CLOUDDENSITY" => TextureUsage::CloudDensity,
            "CLOUDNORMAL" => TextureUsage::CloudNormal,
            "CABLE" => TextureUsage::Cable,
            "FENCE" => TextureUsage::Fence,
            "ENVEFF" => TextureUsage::EnvEff,
            "SCRIPT" => TextureUsage::Script,
            "WATERFLOW" => TextureUsage::WaterFlow,
            "WATERFOAM" => TextureUsage::WaterFoam,
            "WATERFOG" => TextureUsage::WaterFog,
            "WATEROCEAN" => TextureUsage::WaterOcean,
            "WATER" => TextureUsage::Water,
            "FOAMOPACITY" => TextureUsage::FoamOpacity,
            "FOAM" => TextureUsage::Foam,
            "DIFFUSEMIPSHARPEN" => TextureUsage::DiffuseMipSharpen,
            "DIFFUSEDETAIL" => TextureUsage::DiffuseDetail,
            "DIFFUSEDARK" => TextureUsage::DiffuseDark,
            "DIFFUSEALPHAOPAQUE" => TextureUsage::DiffuseAlphaOpaque,
            "DIFFUSE" => TextureUsage::Diffuse,
            "DETAIL" => TextureUsage::Detail,
            "NORMAL" => TextureUsage::Normal,
            "SPECULAR" => TextureUsage::Specular,
            "EMISSIVE" => TextureUsage::Emissive,
            "TINTPALETTE" => TextureUsage::TintPalette,
            "SKIPPROCESSING" => TextureUsage::SkipProcessing,
            "DONOTOPTIMIZE" => TextureUsage::DoNotOptimize,
            "TEST" => TextureUsage::Test,
            "COUNT" => TextureUsage::Count,
            _ => return None,
        };
        Some(usage)
    }
}

/// 纹理用途标志名，按位序排列
const TEXTURE_FLAG_NAMES: [&str; 23] = [
    "not_half",
    "hd_split",
    "x2",
    "x4",
    "y4",
    "x8",
    "x16",
    "x32",
    "x64",
    "y64",
    "x128",
    "x256",
    "x512",
    "y512",
    "x1024",
    "y1024",
    "x2048",
    "y2048",
    "embeddedscriptrt",
    "unk19",
    "unk20",
    "unk21",
    "unk24",
];

/// 纹理用途标志位
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TextureFlags(pub u32);

impl TextureFlags {
    /// 按名称（不区分大小写）设置标志，未知名称返回 false
    pub fn set_named(&mut self, name: &str) -> bool {
        let lower = name.to_ascii_lowercase();
        match TEXTURE_FLAG_NAMES.iter().position(|&flag| flag == lower) {
            Some(bit) => {
                self.0 |= 1 << bit;
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        let lower = name.to_ascii_lowercase();
        TEXTURE_FLAG_NAMES
            .iter()
            .position(|&flag| flag == lower)
            .is_some_and(|bit| self.0 & (1 << bit) != 0)
    }
}

/// 纹理节点上的格式属性
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TextureProperties {
    pub embedded: bool,
    pub format: TextureFormat,
    pub usage: TextureUsage,
    pub extra_flags: u32,
}
