use mandel::{Explorer, app::AppError};

fn main() -> Result<(), AppError> {
    Explorer::new().run()
}
