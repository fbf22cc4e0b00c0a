/// Live measurements of the scroll container, owned by the engine.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewportState {
    /// Last observed rendered height of the container. `0` until the first resize observation.
    pub container_height: u32,
    /// Last observed distance from the top of the scroll content.
    pub scroll_offset: u64,
}

/// Lifecycle of one mounted list.
///
/// `Unmeasured -> Measured -> Unmounted`. There is no way back to `Unmeasured`, and `Unmounted`
/// is terminal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    #[default]
    Unmeasured,
    Measured,
    Unmounted,
}
