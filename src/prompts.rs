//! Prompt templates: the chained message prompt, the self-correcting agent
//! system prompt, and the reflection-pattern research prompts.

use crate::outreach::ProspectFields;

/// Template prompt for the chained workflow's single LLM call.
pub fn outreach_message_prompt(fields: &ProspectFields) -> String {
    let style_instruction = if fields.is_tech {
        "Write the message in rap/verse format to stand out."
    } else {
        "Write a professional, friendly message."
    };

    format!(
        "<task_context>\n\
         Role: You are the founder/salesperson of a B2B SaaS company offering AI-powered sales automation solutions.\n\
         Product: An AI sales rep that automates 70% of a human's work.\n\
         Customer: CEO/Founder/Heads of Sales in companies generating at least $1M in annual revenue.\n\
         </task_context>\n\
         \n\
         <instructions>\n\
         Write the first LinkedIn message after a connection is accepted, which:\n\
         1. Starts with a personal greeting using their first name.\n\
         2. Includes a specific observation about the recipient's company based on their role.\n\
         3. Offers a clear value proposition with numbers (savings or growth).\n\
         4. Ends with a soft question about their interest.\n\
         \n\
         {style_instruction}\n\
         </instructions>\n\
         \n\
         <example>\n\
         Hi John,\n\
         \n\
         I noticed that you're hiring sales reps: we offer an AI seller that automates 70% of a human's work to cut costs and help scale without increasing headcount.\n\
         \n\
         Would this be of interest to you?\n\
         \n\
         Bayram\n\
         </example>\n\
         \n\
         <constraints>\n\
         - Length: 40-60 words\n\
         - Tone: Friendly and direct, not pushy\n\
         - Required: A specific benefit number (percentage or money)\n\
         - Never: Don't offer a demo or call in the first message\n\
         - Signature: Bayram\n\
         </constraints>\n\
         \n\
         <input_variables>\n\
         Contact name: {first_name}\n\
         Company: {company}\n\
         What you noticed about the company: {description}\n\
         </input_variables>\n\
         \n\
         Output: Write a LinkedIn message using the information above.",
        first_name = fields.first_name,
        company = fields.company,
        description = fields.description,
    )
}

/// System prompt for the agentic outreach workflow. The URL self-correction
/// strategy is the whole point: the model recovers from bad URLs by itself.
pub const OUTREACH_AGENT_SYSTEM: &str = "\
You are an AI sales assistant specializing in LinkedIn cold outreach.

Your goal: Generate a personalized LinkedIn connection message.

Available tools:
- fetch_linkedin_profile: Fetches profile data from LinkedIn URLs

CRITICAL: URL Self-Correction Strategy
When the fetch_linkedin_profile tool fails, systematically try these fixes in order:

Step 1: Fix Protocol Issues
- If the URL lacks \"https://\", add it
- If the URL has \"https://\" but lacks \"www.\", add it
- Examples:
  * \"linkedin.com/in/user\" -> \"https://www.linkedin.com/in/user\"
  * \"https://linkedin.com/in/user\" -> \"https://www.linkedin.com/in/user\"

Step 2: Fix Common Username Patterns
LinkedIn usernames can have variations. Try:
- Remove hyphens: \"john-smith\" -> \"johnsmith\"
- Add hyphens between first/last: \"johnsmith\" -> \"john-smith\"
- Remove trailing slashes
- Examples:
  * \"jenhsun-huang\" might be \"jenhsunhuang\"
  * \"satya-nadella\" might be \"satyanadella\"

Step 3: Try Known Variations for Famous People
For well-known tech leaders, try common username patterns:
- First name only: \"sama\" for Sam Altman
- Full name, no spaces: \"jenhsunhuang\" for Jensen Huang
- First initial + last name: \"jhuang\"

Step 4: If All Attempts Fail
- Stop after about 4 failed attempts
- Extract the person's likely name from the URL pattern
- Explain which variations you tried and why they failed
- Generate an appropriate message from that context, and be transparent about the limitation

Instructions:
1. Use fetch_linkedin_profile with the provided URL
2. If it fails, apply the self-correction strategy above (try at least 2-3 variations)
3. Once you have profile data, extract:
   - First name
   - Current company
   - Role/description
   - Whether the company is in the tech/software/AI industry
4. Generate the personalized outreach message:
   - Start with a personal greeting using their first name
   - Include a specific observation about their company or role
   - Offer a clear value proposition with numbers (70% automation)
   - End with a soft question about interest
   - If the company is in tech/software/AI: use rap/verse format
   - Otherwise: use a professional, friendly tone
   - Length: 40-60 words max
   - Signature: Bayram

Context: You're the founder of a B2B SaaS offering AI sales automation that automates 70% of a human's work.
Target: CEOs/Founders/Sales Leaders in $1M+ revenue companies.
";

/// Task prompt handed to the agentic workflow for one URL.
pub fn outreach_agent_task(linkedin_url: &str) -> String {
    format!(
        "Please generate a personalized LinkedIn outreach message for this profile:\n\
         \n\
         LinkedIn URL: {linkedin_url}\n\
         \n\
         Remember to:\n\
         1. Try fetching the profile first\n\
         2. If it fails, analyze the URL and try to fix it\n\
         3. Generate the personalized message based on the profile data"
    )
}

/// System prompt for the research agent (reflection pattern).
pub const RESEARCH_SYSTEM: &str = "\
You are an AI research assistant preparing sales outreach research on prospects.

Your goal: Research a prospect's LinkedIn profile and produce research a salesperson can act on.

Available tools:
- fetch_linkedin_profile: Fetches professional background data from a LinkedIn URL
- request_human_review: Requests human review of your research (external feedback)

Instructions:
1. Use fetch_linkedin_profile to gather profile data before writing research
2. Ground every claim in the profile data; never invent facts
3. When asked to validate your research, call request_human_review and report the feedback you received
4. When given feedback, revise the research rather than defending the original
";

/// Turn 1 of the reflection pattern: initial (V1) research.
pub fn v1_research_prompt(linkedin_url: &str) -> String {
    format!(
        "Research this LinkedIn profile for sales outreach:\n\
         \n\
         LinkedIn URL: {linkedin_url}\n\
         \n\
         Cover:\n\
         1. Professional background\n\
         2. Current role and company\n\
         3. Career highlights\n\
         4. Talking points for a personalized outreach message\n\
         \n\
         Fetch the profile first, then write the research summary."
    )
}

/// Turn 2: ask the model to collect external feedback on its own output.
pub const VALIDATION_PROMPT: &str = "\
Before we finalize this research, request a human review of it.

Call the request_human_review tool with your full research summary and the \
prospect's name, then report back the feedback you received.";

/// Quality checklist embedded in the reflection prompt.
pub const RESEARCH_CRITERIA: &str = "\
Research quality criteria:
1. Accurate: role and company match the profile data
2. Specific: 2-3 concrete talking points, not generic statements
3. Relevant: insights a salesperson could use in an outreach message
4. Grounded: every claim traceable to the profile data";

/// Turn 3: reflect on the collected feedback and produce V2.
pub fn reflection_prompt(feedback: &str) -> String {
    format!(
        "Here is external feedback on your research:\n\
         \n\
         {feedback}\n\
         \n\
         {RESEARCH_CRITERIA}\n\
         \n\
         Reflect on the feedback and write an improved version of the research.\n\
         Address every point raised; keep what was already good."
    )
}
