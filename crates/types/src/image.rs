use std::fmt;
use std::str::FromStr;

/// The `Type` attribute of an `Image` element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageType {
    Volume,
    VolumeSequence,
    LabelMap,
    Segmentation,
    RTStruct,
    Vector,
}

impl ImageType {
    /// Types whose data is itself an annotation rather than something to
    /// annotate.
    pub fn is_annotation(self) -> bool {
        matches!(self, Self::LabelMap | Self::Segmentation | Self::RTStruct)
    }
}

impl FromStr for ImageType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Volume" => Ok(Self::Volume),
            "VolumeSequence" => Ok(Self::VolumeSequence),
            "LabelMap" => Ok(Self::LabelMap),
            "Segmentation" => Ok(Self::Segmentation),
            "RTStruct" => Ok(Self::RTStruct),
            "Vector" => Ok(Self::Vector),
            other => Err(format!("unknown image type '{}'", other)),
        }
    }
}

/// The text content of an image's `Layer` child.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageLayer {
    Background,
    Foreground,
    Segmentation,
    Label,
}

impl ImageLayer {
    /// Annotation-target layers can never be asked to carry a segmentation
    /// themselves.
    pub fn is_annotation_target(self) -> bool {
        matches!(self, Self::Segmentation | Self::Label)
    }
}

impl FromStr for ImageLayer {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Background" => Ok(Self::Background),
            "Foreground" => Ok(Self::Foreground),
            "Segmentation" => Ok(Self::Segmentation),
            "Label" => Ok(Self::Label),
            other => Err(format!("unknown image layer '{}'", other)),
        }
    }
}

/// Viewing-window arrangement requested by a page's `Layout` attribute.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PageLayout {
    #[default]
    TwoOverTwo,
    OneByTwo,
    OneByThree,
    OneByOne,
    TwoByTwo,
}

impl FromStr for PageLayout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "TwoOverTwo" => Ok(Self::TwoOverTwo),
            "OneByTwo" => Ok(Self::OneByTwo),
            "OneByThree" => Ok(Self::OneByThree),
            "OneByOne" => Ok(Self::OneByOne),
            "TwoByTwo" => Ok(Self::TwoByTwo),
            other => Err(format!("unknown layout '{}'", other)),
        }
    }
}

impl fmt::Display for PageLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::TwoOverTwo => "TwoOverTwo",
            Self::OneByTwo => "OneByTwo",
            Self::OneByThree => "OneByThree",
            Self::OneByOne => "OneByOne",
            Self::TwoByTwo => "TwoByTwo",
        };
        f.write_str(name)
    }
}
