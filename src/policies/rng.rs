use rand::{rngs::SmallRng, SeedableRng};
use serde::{Deserialize, Deserializer, Serialize};

/// A small rng that remembers the seed it was built from, if any.
/// Serializes as that seed only, so a deserialized rng restarts its stream.
#[derive(Clone, Debug, Serialize)]
pub struct MaybeSeededRng {
    seed: Option<u64>,
    #[serde(skip)]
    rng: SmallRng,
}

impl MaybeSeededRng {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = if let Some(seed) = seed {
            SmallRng::seed_from_u64(seed)
        } else {
            SmallRng::from_os_rng()
        };

        Self { seed, rng }
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn get_rng(&mut self) -> &mut SmallRng {
        &mut self.rng
    }
}

impl<'de> Deserialize<'de> for MaybeSeededRng {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Seed {
            seed: Option<u64>,
        }

        let Seed { seed } = Seed::deserialize(deserializer)?;
        Ok(Self::new(seed))
    }
}

/// Derives an independent seed for the `stream`-th consumer of a master seed.
pub fn derive_seed(seed: Option<u64>, stream: u64) -> Option<u64> {
    // splitmix64 finalizer, so neighbouring streams do not start correlated
    seed.map(|seed| {
        let mut z = seed.wrapping_add(stream.wrapping_add(1).wrapping_mul(0x9E37_79B9_7F4A_7C15));
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    })
}
