use clap::Args;

#[derive(Args, Default)]
pub struct EmployeeFieldArgs {
    /// First name
    #[arg(long, short)]
    pub first_name: Option<String>,

    /// Last name
    #[arg(long, short)]
    pub last_name: Option<String>,

    /// Email address
    #[arg(long, short)]
    pub email: Option<String>,
}

#[derive(Args)]
pub struct UpdateArgs {
    /// Employee id
    pub id: i64,

    #[command(flatten)]
    pub fields: EmployeeFieldArgs,
}
