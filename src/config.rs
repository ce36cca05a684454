//!Algorithm and level selection

use core::fmt;
use core::str::FromStr;

use crate::{Result, Shrink};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
///Compression algorithm
pub enum Algorithm {
    ///Pass-through copy.
    ///
    ///Accepts only [Level::None].
    None,
    ///LZO1X family.
    Lzo,
    ///Deflate in zlib format.
    Deflate,
    ///LZMA2 in xz container.
    Lzma,
    ///Zstandard.
    Zstd,
    ///Brotli.
    Brotli,
}

impl Algorithm {
    ///Every known algorithm, including ones not compiled in.
    pub const fn all() -> &'static [Algorithm] {
        &[Algorithm::None, Algorithm::Lzo, Algorithm::Deflate, Algorithm::Lzma, Algorithm::Zstd, Algorithm::Brotli]
    }

    ///Returns canonical name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Algorithm::None => "none",
            Algorithm::Lzo => "lzo",
            Algorithm::Deflate => "deflate",
            Algorithm::Lzma => "lzma",
            Algorithm::Zstd => "zstd",
            Algorithm::Brotli => "brotli",
        }
    }

    ///Returns whether codec is compiled into this build.
    pub const fn is_available(&self) -> bool {
        match self {
            Algorithm::None => true,
            Algorithm::Lzo => cfg!(feature = "lzo"),
            Algorithm::Deflate => cfg!(any(feature = "zlib", feature = "zlib-static", feature = "zlib-ng")),
            Algorithm::Lzma => cfg!(any(feature = "lzma", feature = "lzma-static")),
            Algorithm::Zstd => cfg!(feature = "zstd"),
            Algorithm::Brotli => cfg!(feature = "brotli-c"),
        }
    }

    ///Returns levels this algorithm accepts.
    pub const fn levels(&self) -> &'static [Level] {
        match self {
            Algorithm::None => &[Level::None],
            _ => &[Level::Min, Level::Mid, Level::Max],
        }
    }
}

impl fmt::Display for Algorithm {
    #[inline]
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = UnknownName;

    fn from_str(text: &str) -> core::result::Result<Self, Self::Err> {
        match text.to_ascii_lowercase().as_str() {
            "none" | "null" => Ok(Algorithm::None),
            "lzo" => Ok(Algorithm::Lzo),
            "deflate" | "zlib" | "lzw" => Ok(Algorithm::Deflate),
            "lzma" | "xz" => Ok(Algorithm::Lzma),
            "zstd" => Ok(Algorithm::Zstd),
            "brotli" => Ok(Algorithm::Brotli),
            _ => Err(UnknownName(text.to_owned())),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
///Coarse quality selector.
///
///Not a numeric scale, each algorithm maps it to own parameters.
pub enum Level {
    ///No level, valid only for [Algorithm::None].
    None,
    ///Fastest.
    Min,
    ///Balanced, usually library default.
    Mid,
    ///Best ratio.
    Max,
}

impl Level {
    ///Every level.
    pub const fn all() -> &'static [Level] {
        &[Level::None, Level::Min, Level::Mid, Level::Max]
    }

    ///Returns canonical name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Level::None => "none",
            Level::Min => "min",
            Level::Mid => "mid",
            Level::Max => "max",
        }
    }
}

impl fmt::Display for Level {
    #[inline]
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = UnknownName;

    fn from_str(text: &str) -> core::result::Result<Self, Self::Err> {
        match text.to_ascii_lowercase().as_str() {
            "none" => Ok(Level::None),
            "min" | "fast" => Ok(Level::Min),
            "mid" | "default" => Ok(Level::Mid),
            "max" | "best" => Ok(Level::Max),
            _ => Err(UnknownName(text.to_owned())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown name '{0}'")]
///Name of algorithm or level is not recognized.
pub struct UnknownName(pub String);

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
///Algorithm and level pair.
///
///Defaults to pass-through.
pub struct Config {
    ///Algorithm
    pub algorithm: Algorithm,
    ///Level
    pub level: Level,
}

impl Config {
    #[inline(always)]
    ///Creates new default config
    pub const fn new() -> Self {
        Self {
            algorithm: Algorithm::None,
            level: Level::None,
        }
    }

    #[inline]
    ///Sets algorithm
    pub const fn algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    #[inline]
    ///Sets level
    pub const fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    #[inline]
    ///Creates context from this config.
    pub fn init(&self) -> Result<Shrink> {
        Shrink::init(self.algorithm, self.level)
    }
}

impl Default for Config {
    #[inline(always)]
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for Config {
    type Err = UnknownName;

    ///Parses `algorithm` or `algorithm:level`.
    ///
    ///Level defaults to `none` for pass-through and `mid` otherwise.
    fn from_str(text: &str) -> core::result::Result<Self, Self::Err> {
        let (algorithm, level) = match text.split_once(':') {
            Some((algorithm, level)) => (algorithm.parse()?, Some(level.parse()?)),
            None => (text.parse()?, None),
        };
        let level = level.unwrap_or(match algorithm {
            Algorithm::None => Level::None,
            _ => Level::Mid,
        });

        Ok(Self::new().algorithm(algorithm).level(level))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_parse_algorithm_aliases() {
        assert_eq!("null".parse::<Algorithm>().unwrap(), Algorithm::None);
        assert_eq!("LZW".parse::<Algorithm>().unwrap(), Algorithm::Deflate);
        assert_eq!("xz".parse::<Algorithm>().unwrap(), Algorithm::Lzma);
        assert!("lz4".parse::<Algorithm>().is_err());
    }

    #[test]
    fn should_display_parseable_names() {
        for algorithm in Algorithm::all() {
            assert_eq!(algorithm.to_string().parse::<Algorithm>().unwrap(), *algorithm);
        }
        for level in Level::all() {
            assert_eq!(level.to_string().parse::<Level>().unwrap(), *level);
        }
    }

    #[test]
    fn should_parse_config() {
        let config: Config = "lzma:max".parse().unwrap();
        assert_eq!(config, Config::new().algorithm(Algorithm::Lzma).level(Level::Max));

        let config: Config = "deflate".parse().unwrap();
        assert_eq!(config.level, Level::Mid);

        let config: Config = "none".parse().unwrap();
        assert_eq!(config, Config::default());

        let error = "zstd:ultra".parse::<Config>().unwrap_err();
        assert_eq!(error, UnknownName("ultra".to_owned()));
    }

    #[test]
    fn should_list_levels() {
        assert_eq!(Algorithm::None.levels(), &[Level::None]);
        assert!(!Algorithm::Lzma.levels().contains(&Level::None));
    }
}
