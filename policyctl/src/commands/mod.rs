pub mod mutate;
pub mod query;

use policy_model::Policy;

pub(crate) fn print_table(policies: &[Policy]) {
    if policies.is_empty() {
        println!("No policies found.");
        return;
    }

    println!(
        "{:<6} {:<20} {:<14} {:>12} {:<10} {:<10} {:<6} {}",
        "ID", "NUMBER", "TYPE", "PREMIUM", "START", "END", "ACTIVE", "CUSTOMER"
    );
    for policy in policies {
        println!(
            "{:<6} {:<20} {:<14} {:>12.2} {:<10} {:<10} {:<6} {}",
            policy.policy_id,
            policy.policy_number,
            policy.policy_type,
            policy.premium_amount,
            policy.start_date,
            policy.end_date,
            if policy.is_active { "yes" } else { "no" },
            policy.customer_id
        );
    }
}

pub(crate) fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
