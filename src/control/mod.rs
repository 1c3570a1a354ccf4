//! Pure control primitives used by the control loop: the circular
//! setting selector and the shared button dead-time gate.

pub mod cycle;
pub mod debounce;
