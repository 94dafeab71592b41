//! Persistent cache of compatibility results keyed by profile fingerprints.
//!
//! Results are pure functions of the two profiles and the configuration, so
//! a result stays valid for as long as neither profile changes. Each entry is
//! keyed by both party ids together with a BLAKE3 fingerprint of each
//! profile; editing a profile changes its fingerprint and the stale entry is
//! simply never looked up again. Each cache also records a fingerprint of the
//! [`CompatibilityConfig`] its results were scored under; loading a file
//! written under another configuration yields an empty cache.
#![forbid(unsafe_code)]

use std::collections::BTreeMap;
use std::fmt;
use std::io::{BufReader, ErrorKind};

use bincode::Options;
use camino::Utf8Path;
use kindred_core::{
    CompatibilityConfig, CompatibilityResult, CompatibilityScorer, PartyId, PartyProfile,
};
use kindred_fs::{open_utf8_file, write_utf8_file_atomic};
use serde::{Deserialize, Serialize};

use crate::{CompatibilityEngine, bincode_options, error::ResultCacheError};

fn digest<T: Serialize>(value: &T) -> Result<[u8; 32], ResultCacheError> {
    let bytes =
        serde_json::to_vec(value).map_err(|source| ResultCacheError::Fingerprint { source })?;
    Ok(*blake3::hash(&bytes).as_bytes())
}

/// BLAKE3 digest of a profile's canonical JSON rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ProfileFingerprint([u8; 32]);

impl ProfileFingerprint {
    /// Fingerprint `profile`.
    ///
    /// Profiles hold only ordered collections, so equal profiles always
    /// render to identical bytes.
    ///
    /// # Errors
    /// Returns [`ResultCacheError::Fingerprint`] when the profile cannot be
    /// rendered.
    pub fn of(profile: &PartyProfile) -> Result<Self, ResultCacheError> {
        digest(profile).map(Self)
    }

    /// Lowercase hexadecimal rendering.
    #[must_use]
    pub fn to_hex(&self) -> String {
        blake3::Hash::from(self.0).to_hex().to_string()
    }
}

impl fmt::Display for ProfileFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// BLAKE3 digest of a scoring configuration's canonical JSON rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConfigFingerprint([u8; 32]);

impl ConfigFingerprint {
    /// Fingerprint `config`.
    ///
    /// # Errors
    /// Returns [`ResultCacheError::Fingerprint`] when the configuration
    /// cannot be rendered.
    pub fn of(config: &CompatibilityConfig) -> Result<Self, ResultCacheError> {
        digest(config).map(Self)
    }

    /// Lowercase hexadecimal rendering.
    #[must_use]
    pub fn to_hex(&self) -> String {
        blake3::Hash::from(self.0).to_hex().to_string()
    }
}

impl fmt::Display for ConfigFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Unordered key for a pair of fingerprinted parties.
///
/// # Examples
/// ```
/// use kindred_core::{PartyId, PartyProfile};
/// use kindred_scorer::{PairKey, ProfileFingerprint};
///
/// let print = ProfileFingerprint::of(&PartyProfile::default()).expect("fingerprint");
/// let ab = PairKey::new((PartyId::from("a"), print), (PartyId::from("b"), print));
/// let ba = PairKey::new((PartyId::from("b"), print), (PartyId::from("a"), print));
/// assert_eq!(ab, ba);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PairKey {
    first: (PartyId, ProfileFingerprint),
    second: (PartyId, ProfileFingerprint),
}

impl PairKey {
    /// Build a key; argument order does not matter.
    #[must_use]
    pub fn new(a: (PartyId, ProfileFingerprint), b: (PartyId, ProfileFingerprint)) -> Self {
        if a <= b {
            Self {
                first: a,
                second: b,
            }
        } else {
            Self {
                first: b,
                second: a,
            }
        }
    }

    /// Fingerprint both profiles and build their key.
    ///
    /// # Errors
    /// Propagates [`ProfileFingerprint::of`] failures.
    pub fn for_profiles(
        a: (&PartyId, &PartyProfile),
        b: (&PartyId, &PartyProfile),
    ) -> Result<Self, ResultCacheError> {
        Ok(Self::new(
            (a.0.clone(), ProfileFingerprint::of(a.1)?),
            (b.0.clone(), ProfileFingerprint::of(b.1)?),
        ))
    }

    /// Report whether `party` is one side of the pair.
    #[must_use]
    pub fn involves(&self, party: &PartyId) -> bool {
        self.first.0 == *party || self.second.0 == *party
    }
}

/// Compatibility results keyed by [`PairKey`], persisted with `bincode`.
///
/// Every cache is scoped to one [`ConfigFingerprint`]. Callers score misses
/// with an engine running that configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultCache {
    scope: ConfigFingerprint,
    entries: BTreeMap<PairKey, CompatibilityResult>,
}

impl ResultCache {
    /// Create an empty cache for results scored under `scope`.
    #[must_use]
    pub const fn new(scope: ConfigFingerprint) -> Self {
        Self {
            scope,
            entries: BTreeMap::new(),
        }
    }

    /// Create an empty cache scoped to `engine`'s configuration.
    ///
    /// # Errors
    /// Returns [`ResultCacheError::Fingerprint`] when the configuration
    /// cannot be fingerprinted.
    pub fn for_engine(engine: &CompatibilityEngine) -> Result<Self, ResultCacheError> {
        ConfigFingerprint::of(engine.config()).map(Self::new)
    }

    /// The configuration fingerprint this cache is scoped to.
    #[must_use]
    pub const fn scope(&self) -> ConfigFingerprint {
        self.scope
    }

    /// Load a cache file for `scope`.
    ///
    /// A missing file, or one written under a different configuration,
    /// yields an empty cache.
    ///
    /// # Errors
    /// Returns [`ResultCacheError::ReadFile`] when the file exists but cannot
    /// be opened and [`ResultCacheError::Deserialise`] when it does not decode.
    pub fn load(path: &Utf8Path, scope: ConfigFingerprint) -> Result<Self, ResultCacheError> {
        let file = match open_utf8_file(path) {
            Ok(file) => file,
            Err(source) if source.kind() == ErrorKind::NotFound => {
                log::debug!("no result cache at {path}; starting empty");
                return Ok(Self::new(scope));
            }
            Err(source) => {
                return Err(ResultCacheError::ReadFile {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        let cache: Self = bincode_options()
            .deserialize_from(BufReader::new(file))
            .map_err(|source| ResultCacheError::Deserialise {
                path: path.to_path_buf(),
                source,
            })?;
        if cache.scope != scope {
            log::info!(
                "result cache at {path} was scored under configuration {}; starting empty",
                cache.scope
            );
            return Ok(Self::new(scope));
        }
        log::debug!("loaded {} cached results from {path}", cache.len());
        Ok(cache)
    }

    /// Persist the cache, creating parent directories when missing.
    ///
    /// The previous file stays intact until the new contents are complete.
    ///
    /// # Errors
    /// Returns [`ResultCacheError::Serialise`] when encoding fails and
    /// [`ResultCacheError::WriteFile`] for filesystem failures.
    pub fn write(&self, path: &Utf8Path) -> Result<(), ResultCacheError> {
        let bytes = bincode_options()
            .serialize(self)
            .map_err(|source| ResultCacheError::Serialise {
                path: path.to_path_buf(),
                source,
            })?;
        write_utf8_file_atomic(path, &bytes).map_err(|source| ResultCacheError::WriteFile {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("wrote {} cached results to {path}", self.len());
        Ok(())
    }

    /// Number of cached pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Report whether the cache holds no pairs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up a cached result.
    #[must_use]
    pub fn get(&self, key: &PairKey) -> Option<&CompatibilityResult> {
        self.entries.get(key)
    }

    /// Store a result, returning any previous value for the pair.
    pub fn insert(
        &mut self,
        key: PairKey,
        result: CompatibilityResult,
    ) -> Option<CompatibilityResult> {
        self.entries.insert(key, result)
    }

    /// Drop every entry involving `party` and return how many were removed.
    pub fn evict_party(&mut self, party: &PartyId) -> usize {
        let before = self.entries.len();
        self.entries.retain(|key, _| !key.involves(party));
        before - self.entries.len()
    }

    /// Return the cached result for the pair, scoring and storing it on a
    /// miss.
    ///
    /// # Errors
    /// Returns [`ResultCacheError::Fingerprint`] when a profile cannot be
    /// fingerprinted and [`ResultCacheError::Score`] when scoring fails.
    /// Failed scores are not cached.
    pub fn get_or_compute<S>(
        &mut self,
        scorer: &S,
        a: (&PartyId, &PartyProfile),
        b: (&PartyId, &PartyProfile),
    ) -> Result<CompatibilityResult, ResultCacheError>
    where
        S: CompatibilityScorer + ?Sized,
    {
        let key = PairKey::for_profiles(a, b)?;
        if let Some(hit) = self.entries.get(&key) {
            return Ok(hit.clone());
        }
        let result = scorer.score(a.1, b.1)?;
        self.entries.insert(key, result.clone());
        Ok(result)
    }
}
