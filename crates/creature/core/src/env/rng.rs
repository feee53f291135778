//! Deterministic per-agent random streams.
//!
//! Every randomized gate (delay rolls, heal cooldown jitter, spell picks,
//! intelligence checks) draws from the agent's own [`AgentRng`]. The stream is
//! seeded at spawn from the world seed and the agent's stable load id, so the
//! same creature makes the same rolls after a save/reload regardless of how
//! many other creatures were ticked before it.

/// PCG random number generator (Permuted Congruential Generator).
///
/// PCG-XSH-RR: 32-bit output from 64-bit state.
///
/// - **Deterministic**: Same seed always produces same output
/// - **Fast**: Single multiply + xorshift + rotate
/// - **Small state**: Only 64 bits
///
/// See <https://www.pcg-random.org/>.
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    /// PCG multiplier constant.
    const MULTIPLIER: u64 = 6364136223846793005;

    /// PCG increment constant.
    const INCREMENT: u64 = 1442695040888963407;

    /// Advance the PCG state by one step.
    #[inline]
    pub fn step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// PCG output function using XSH-RR (xorshift high, random rotate).
    #[inline]
    pub fn output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }

    /// One-shot draw from a seed.
    pub fn next_u32(seed: u64) -> u32 {
        Self::output(Self::step(seed))
    }
}

/// Compute a deterministic seed from world and instance components.
///
/// # Arguments
///
/// * `world_seed` - Base seed of the session
/// * `load_id` - Stable per-instance identifier that survives save/reload
/// * `actor_id` - Entity the stream belongs to
/// * `context` - Separates independent streams for the same entity
pub fn compute_seed(world_seed: u64, load_id: u64, actor_id: u32, context: u32) -> u64 {
    // SplitMix64 / FxHash style mixing
    let mut hash = world_seed;

    hash ^= load_id.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= (actor_id as u64).wrapping_mul(0x517cc1b727220a95);
    hash ^= (context as u64).wrapping_mul(0x85ebca6b);

    // Final avalanche step
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;

    hash
}

/// A stateful PCG stream owned by one agent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AgentRng {
    state: u64,
}

impl AgentRng {
    pub fn seeded(seed: u64) -> Self {
        Self { state: seed }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = PcgRng::step(self.state);
        PcgRng::output(self.state)
    }

    /// Uniform float in `[0, 1)`.
    pub fn next_f32(&mut self) -> f32 {
        (self.next_u32() >> 8) as f32 / (1u32 << 24) as f32
    }

    /// Uniform float in `[min, max)`; returns `min` when the range is empty.
    pub fn range_f32(&mut self, min: f32, max: f32) -> f32 {
        if max <= min {
            return min;
        }
        min + self.next_f32() * (max - min)
    }

    /// Uniform index in `[0, len)`. `len` must be non-zero.
    pub fn index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0, "index() on an empty range");
        (self.next_u32() as usize) % len.max(1)
    }

    /// Roll a d100 (1-100 inclusive).
    pub fn roll_d100(&mut self) -> u32 {
        (self.next_u32() % 100) + 1
    }

    /// Percentage check: succeeds with probability `chance`/100.
    pub fn success_roll(&mut self, chance: u32) -> bool {
        self.roll_d100() <= chance
    }

    /// Fair coin.
    pub fn coin(&mut self) -> bool {
        self.next_u32() & 1 == 1
    }
}

impl Default for AgentRng {
    fn default() -> Self {
        Self::seeded(compute_seed(0, 0, 0, 0))
    }
}
