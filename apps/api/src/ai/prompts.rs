//! Prompt templates for the AI-proxy routes.

pub fn find_employees(company: &str) -> String {
    format!(
        "Find 3 hypothetical or real public profiles of employees currently working at {company}. \
        Return the result ONLY as a JSON array with objects containing: \
        \"name\", \"role\", \"profileUrl\" (use a valid looking linkedin url format like \
        https://www.linkedin.com/in/name-company). \
        Do not include any markdown formatting or explanations, just the raw JSON."
    )
}

pub fn referral_message(
    job_title: &str,
    company: &str,
    location: &str,
    employee_name: &str,
    employee_role: &str,
) -> String {
    format!(
        "Write a professional and polite LinkedIn connection request/referral message (max 150 words).\n\
        Context: The user wants to ask for a referral for the job \"{job_title}\" at \"{company}\" in \"{location}\".\n\
        Target Recipient: {employee_name} ({employee_role}).\n\
        The tone should be enthusiastic but professional. Include placeholders for the user's portfolio link and name."
    )
}

pub fn referral_suggestions(company: &str, job_title: Option<&str>) -> String {
    let role_clause = job_title
        .map(|t| format!(" in roles related to {t}"))
        .unwrap_or_default();
    format!(
        "You are a professional networking assistant. Generate 3 realistic employee profiles \
        who currently work at {company}{role_clause}.\n\n\
        For each person, provide:\n\
        1. Full name (realistic, diverse names)\n\
        2. Current job title at {company}\n\
        3. Department/Team\n\
        4. Years at company (between 1-8 years)\n\
        5. LinkedIn profile URL (format: https://linkedin.com/in/firstname-lastname)\n\
        6. Brief professional summary (2-3 sentences about their role and expertise)\n\
        7. Why they might be a good referral contact (1 sentence)\n\n\
        Format the response as a JSON array with this structure:\n\
        [\n\
          {{\n\
            \"name\": \"Full Name\",\n\
            \"title\": \"Job Title\",\n\
            \"department\": \"Department Name\",\n\
            \"yearsAtCompany\": number,\n\
            \"linkedinUrl\": \"https://linkedin.com/in/profile\",\n\
            \"summary\": \"Professional summary...\",\n\
            \"whyContact\": \"Reason to contact...\"\n\
          }}\n\
        ]\n\n\
        Return ONLY the JSON array, no additional text."
    )
}
