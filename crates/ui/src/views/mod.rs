mod reading;
mod result;
mod state;

pub use reading::ReadingTestView;
pub use result::ResultView;
pub use state::ViewError;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;
