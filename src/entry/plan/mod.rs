mod build;
mod execute;
mod types;

pub(super) use build::build_plan;
pub(super) use execute::execute_plan;

fn log_fatal(err: &crate::error::AppError) {
    tracing::error!("{}", err);
}
