// Pipeline stages, in execution order
//
// Each stage is a small struct borrowing the ports it needs from the controller.
// Stages never exit the process; they return a typed result and the controller
// decides what happens next.

#[path = "01_detect.rs"]
pub mod detect;
#[path = "02_recipe.rs"]
pub mod recipe;
#[path = "03_transform.rs"]
pub mod transform;
#[path = "04_build.rs"]
pub mod build;
