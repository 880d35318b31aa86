pub const SUBMISSION_PROMPT: &str = r#"You are an expert in waste management and recycling. Analyze this image and provide:
1. The type of waste (e.g., plastic, paper, glass, metal, organic)
2. An estimate of the quantity or amount (in kg or liters)
3. Your confidence level in this assessment (as a percentage)

Respond in JSON format like this:
{
  "wasteType": "type of waste",
  "quantity": "estimated quantity with unit",
  "confidence": confidence level as a number between 0 and 1
}"#;

pub fn verification_prompt(expected_waste_type: &str, expected_amount: &str) -> String {
    format!(
        r#"You are an expert in waste management and recycling. Analyze this image and provide:
1. Confirm if the waste type matches: {expected_waste_type}
2. Estimate if the quantity matches: {expected_amount}
3. Your confidence level in this assessment (as a percentage)

Respond in JSON format like this (no markdown formatting):
{{
  "wasteTypeMatch": true/false,
  "quantityMatch": true/false,
  "confidence": confidence level as a number between 0 and 1
}}"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verification_prompt_contains_expectation() {
        let prompt = verification_prompt("plastic", "3 kg");
        assert!(prompt.contains("waste type matches: plastic"));
        assert!(prompt.contains("quantity matches: 3 kg"));
        assert!(prompt.contains("\"wasteTypeMatch\": true/false"));
    }
}
