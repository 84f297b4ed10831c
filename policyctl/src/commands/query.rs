use super::{print_json, print_table};
use anyhow::Result;
use clap::Args;
use policy_client::PolicyApi;
use policy_model::PolicyId;

#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Output machine-readable JSON
    #[arg(long, action)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct GetArgs {
    /// Policy identifier
    pub id: PolicyId,

    /// Output machine-readable JSON
    #[arg(long, action)]
    pub json: bool,
}

pub async fn list(api: &dyn PolicyApi, args: ListArgs) -> Result<()> {
    let policies = api.list_policies().await?;

    if args.json {
        return print_json(&policies);
    }

    print_table(&policies);
    Ok(())
}

pub async fn get(api: &dyn PolicyApi, args: GetArgs) -> Result<()> {
    let policy = api.get_policy(args.id).await?;

    if args.json {
        return print_json(&policy);
    }

    print_table(std::slice::from_ref(&policy));
    Ok(())
}
