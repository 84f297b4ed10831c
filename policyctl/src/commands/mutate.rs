use super::print_json;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Args;
use policy_client::PolicyApi;
use policy_model::{parse_amount, parse_date, Policy, PolicyId};
use tracing::info;

/// Every field of a policy except its identifier.
#[derive(Args, Debug, Clone)]
pub struct PolicyFields {
    /// Policy number, e.g. POL123
    #[arg(long)]
    pub number: String,

    /// Policy type, e.g. Health or Auto
    #[arg(long = "type")]
    pub policy_type: String,

    /// Premium amount
    #[arg(long, value_parser = parse_amount, allow_negative_numbers = true)]
    pub premium: f64,

    /// Start date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub start: NaiveDate,

    /// End date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub end: NaiveDate,

    /// Mark the policy active
    #[arg(long, action)]
    pub active: bool,

    /// Owning customer identifier
    #[arg(long, default_value_t = 0)]
    pub customer: u32,
}

impl PolicyFields {
    fn into_policy(self, policy_id: PolicyId) -> Policy {
        Policy {
            policy_id,
            policy_number: self.number,
            policy_type: self.policy_type,
            premium_amount: self.premium,
            start_date: self.start,
            end_date: self.end,
            is_active: self.active,
            customer_id: self.customer,
        }
    }
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    #[command(flatten)]
    pub fields: PolicyFields,
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Policy identifier
    pub id: PolicyId,

    #[command(flatten)]
    pub fields: PolicyFields,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Policy identifier
    pub id: PolicyId,
}

pub async fn create(api: &dyn PolicyApi, args: CreateArgs) -> Result<()> {
    let draft = args.fields.into_policy(0);
    draft.validate().context("Refusing to send incomplete policy")?;

    let created = api.create_policy(&draft).await?;
    info!(policy_id = created.policy_id, "Policy created");
    print_json(&created)
}

pub async fn update(api: &dyn PolicyApi, args: UpdateArgs) -> Result<()> {
    let policy = args.fields.into_policy(args.id);
    policy.validate().context("Refusing to send incomplete policy")?;

    let updated = api.update_policy(args.id, &policy).await?;
    info!(policy_id = args.id, "Policy updated");
    print_json(&updated)
}

pub async fn delete(api: &dyn PolicyApi, args: DeleteArgs) -> Result<()> {
    api.delete_policy(args.id).await?;
    println!("Deleted policy {}", args.id);
    Ok(())
}
