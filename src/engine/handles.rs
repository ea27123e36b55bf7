use slotmap::new_key_type;

new_key_type! {
    /// Handle to a mounted element owned by the presentation tree.
    pub struct ElementId;
    /// Handle to a bound scroll progress source.
    pub struct ProgressHandle;
    /// Handle to a bound output value, updated every tick.
    pub struct ValueHandle;
    /// Handle to a bound viewport trigger.
    pub struct TriggerHandle;
}

new_key_type! {
    pub(crate) struct SequenceId;
    pub(crate) struct LoopId;
}
