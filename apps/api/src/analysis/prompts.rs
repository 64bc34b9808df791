// All LLM prompt constants for the analysis features.
// Templates use `{placeholder}` tokens filled with `str::replace` before
// sending. Each scored template embeds band guidance so the model uses the
// full 0-100 range instead of clustering around 70-79.

/// Job-matched resume analysis. Replace `{resume_text}`, `{job_description}`.
pub const JOB_ANALYSIS_PROMPT: &str = r#"You are an expert ATS (Applicant Tracking System) evaluator and career coach.
Analyze the following resume against the provided job description and give detailed, constructive feedback.

Scoring guidance:
- Use the FULL range from 0 to 100.
- Exceptional quality resumes: 90-100.
- Strong resumes: 80-89.
- Good resumes: 75-79.
- Average resumes: 65-74.
- Below average resumes: below 65.
- Be fair - if a resume is truly outstanding, do not hesitate to score above 90.
- Avoid clustering all scores in a narrow range.

RESUME TEXT:
{resume_text}

JOB DESCRIPTION:
{job_description}

Return the result in EXACTLY this JSON format (keep the same keys as shown):
{
    "score": <number between 0-100>,
    "summaryFeedback": "<feedback on the summary/objective>",
    "skillsFeedback": "<feedback on skills alignment with job requirements>",
    "experienceFeedback": "<feedback on work experience relevance>",
    "educationFeedback": "<feedback on education background>",
    "projectFeedback": "<feedback on projects and achievements>",
    "jobRoleSuggestions": "<suggestions for better job role positioning>",
    "overallSuggestions": "<overall recommendations for improvement>"
}
IMPORTANT:
- The score must be a raw number between 0 and 100 (integer or float) without a percent sign.
- If the resume is a perfect match for the job description, do not hesitate to score above 90."#;

/// Comprehensive resume analysis (no job description). Replace `{resume_text}`.
pub const COMPREHENSIVE_ANALYSIS_PROMPT: &str = r#"You are an expert ATS (Applicant Tracking System) evaluator and career coach.
Analyze the resume carefully and give constructive, actionable feedback.

Scoring guidance:
- Use the FULL range from 0 to 100.
- Exceptional quality resumes: 90-100.
- Strong resumes: 80-89.
- Good resumes: 75-79.
- Average resumes: 65-74.
- Below average resumes: below 65.
- Be fair - if a resume is truly outstanding, do not hesitate to score above 90.
- Avoid clustering all scores in a narrow range.

RESUME TEXT:
{resume_text}

Return the result in EXACTLY this JSON format (keys and structure must match exactly):
{
    "score": <number between 0-100>,
    "comprehensiveAnalysis": "<detailed overall analysis of the resume>",
    "summaryFeedback": "<feedback on the summary/objective>",
    "skillsFeedback": "<feedback on skills relevance and presentation>",
    "experienceFeedback": "<feedback on work experience relevance and impact>",
    "educationFeedback": "<feedback on education background>",
    "projectFeedback": "<feedback on projects and achievements>",
    "jobRoleSuggestions": "<suggestions for better job role positioning>",
    "overallSuggestions": "<overall recommendations for improvement>"
}
IMPORTANT:
- The score must be a raw number between 0 and 100 (integer or float) without a percent sign."#;

/// LinkedIn profile optimization. Replace `{profile_text}`.
pub const LINKEDIN_OPTIMIZER_PROMPT: &str = r#"You are a LinkedIn branding expert and career coach.
Evaluate the LinkedIn profile content and provide constructive, improvement-focused feedback.

Scoring guidance:
- Use the FULL range from 0 to 100.
- Exceptional profiles: 90-100.
- Strong profiles: 80-89.
- Good profiles: 75-79.
- Average profiles: 65-74.
- Weak profiles: below 65.
- Avoid clustering all scores between 70 and 79 - reward excellence, penalize weak points.

LINKEDIN PROFILE TEXT:
{profile_text}

Return the result in EXACTLY this JSON format (all values must be strings except profileStrengthScore which must be a float):
{
    "profileStrengthScore": <number between 0-100>,
    "headlineFeedback": "<feedback on profile headline optimization>",
    "summaryFeedback": "<feedback on profile summary/about section>",
    "experienceFeedback": "<feedback on experience section descriptions>",
    "skillsFeedback": "<feedback on skills section and endorsements>",
    "activityFeedback": "<feedback on posts, articles, and engagement>",
    "keywordSuggestions": "<comma-separated keywords to include for SEO>",
    "overallSuggestions": "<overall recommendations for profile optimization>"
}
IMPORTANT:
- profileStrengthScore must be a raw number between 0 and 100 (integer or float) without a percent sign."#;

/// GitHub profile analysis. Replace `{username}`, `{repo_count}`,
/// `{repo_data}`, `{language_chart}`, `{activity_chart}`.
///
/// The chart text is computed locally; the orchestrator overwrites the chart
/// fields after the call, so the model's echo never reaches the response.
pub const GITHUB_PROFILE_PROMPT: &str = r#"You are a senior engineering manager reviewing a candidate's GitHub profile. Analyze the following repository data to provide insights into their tech stack and development practices.

GITHUB PROFILE DATA:
Username: {username}
Number of repositories: {repo_count}

Repository Details:
{repo_data}

CHART DATA PROVIDED:
Language Distribution Chart: {language_chart}
Repository Activity Chart: {activity_chart}

Please analyze the profile and provide a response in the following JSON format. ALL VALUES MUST BE STRINGS:
{
    "techStack": "<detailed analysis of the technology stack and programming languages used>",
    "codeQualityInsights": "<insights about code quality based on repository structure, naming, descriptions, and activity>",
    "languageDistributionChart": "{language_chart}",
    "repositoryCreationActivityChart": "{activity_chart}",
    "overallSuggestions": "<suggestions for improving the GitHub profile and development practices>"
}

IMPORTANT:
- Use the exact chart data provided above for languageDistributionChart and repositoryCreationActivityChart
- Do NOT modify the chart syntax - copy it exactly as shown
- All fields should be detailed string responses

Focus on:
1. Diversity and depth of technology stack
2. Project complexity and innovation
3. Consistency in development activity
4. Documentation quality (based on descriptions)
5. Open source contributions and collaboration
6. Professional presentation of work"#;

/// GitHub repository README analysis. Replace `{repository_url}`,
/// `{readme_content}`.
pub const GITHUB_REPOSITORY_PROMPT: &str = r#"You are an experienced open-source project maintainer and documentation expert. Analyze the following repository README for quality, clarity, and completeness.

REPOSITORY URL: {repository_url}

README CONTENT:
{readme_content}

Please analyze the README and provide a response in the following JSON format:
{
    "purposeFeedback": "<feedback on how clearly the project purpose and goals are communicated>",
    "documentationQualityFeedback": "<feedback on documentation quality, completeness, and clarity>",
    "overallSuggestions": "<overall suggestions for improving the repository documentation>"
}

Focus on:
1. Project description and purpose clarity
2. Installation and setup instructions
3. Usage examples and documentation
4. Contribution guidelines
5. Code organization and structure explanation
6. Professional presentation
7. Missing essential sections
8. Technical accuracy and completeness"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_prompt_placeholders_fill_in() {
        let prompt = JOB_ANALYSIS_PROMPT
            .replace("{resume_text}", "RESUME BODY")
            .replace("{job_description}", "JD BODY");
        assert!(prompt.contains("RESUME BODY"));
        assert!(prompt.contains("JD BODY"));
        assert!(!prompt.contains("{resume_text}"));
        assert!(!prompt.contains("{job_description}"));
    }

    #[test]
    fn test_scored_prompts_carry_band_guidance() {
        for template in [
            JOB_ANALYSIS_PROMPT,
            COMPREHENSIVE_ANALYSIS_PROMPT,
            LINKEDIN_OPTIMIZER_PROMPT,
        ] {
            assert!(template.contains("Use the FULL range from 0 to 100"));
        }
    }

    #[test]
    fn test_profile_prompt_embeds_chart_text_twice() {
        let prompt = GITHUB_PROFILE_PROMPT.replace("{language_chart}", "pie CHART");
        // Once in the data section, once inside the JSON echo instruction.
        assert_eq!(prompt.matches("pie CHART").count(), 2);
    }
}
