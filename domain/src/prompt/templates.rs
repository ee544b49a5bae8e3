//! Prompt templates for every stage of the diagnostic pipeline.
//!
//! System prompts carry the analysis frameworks; user prompts embed the
//! turn context. The industry string passes through unmodified on every
//! call so the generated questions stay grounded in the caller's domain
//! vocabulary.

use crate::diagnostic::analysis::DepartmentSummary;
use crate::diagnostic::policy::PolicyThresholds;
use crate::diagnostic::scoring::ScoreRecord;
use crate::diagnostic::workflow::{Exchange, Workflow};

/// Templates for generating prompts at each pipeline stage
pub struct PromptTemplate;

impl PromptTemplate {
    /// The fixed opening question for the `"START"` sentinel
    pub fn opening_question() -> &'static str {
        "Let's start with your most time-consuming coordination task. What's the one workflow \
         where you spend hours chasing information or waiting for updates?"
    }

    /// The fixed opening explanation for the `"START"` sentinel
    pub fn opening_explanation() -> &'static str {
        "We're looking for tasks that consume significant time AND might block other work when \
         they fail. Coordination tasks often reveal cascade patterns."
    }

    /// System prompt for the scoring pass
    pub fn scoring_system() -> &'static str {
        r#"You are an operations diagnostic expert. Analyze the user's response using these frameworks (NEVER mention them to the user):

EIGENQUESTION TEST:
- Is this ROOT cause or symptom?
- Does failure CASCADE (stop someone else's work) or just waste time?
- Standalone Value: Would they use ONLY this automation daily?

INVERSION CHECK:
- What if this task NEVER existed? Would operations improve?
- If YES -> compensating work, not eigenquestion
- If NO -> potential cascade trigger

SECOND-ORDER EFFECTS:
- Trace failure path 3 levels deep
- Does it reach executive escalation?
- Count how many people/teams affected

MENTAL MODEL MISMATCH:
- What does the user THINK the problem is?
- What is it ACTUALLY?
- Are they optimizing symptoms vs fixing root cause?

RESPONSE QUALITY:
- Specificity Score (0-10): Concrete examples/numbers or vague generalities?
- Cascade Score (0-10): Does failure stop other work? How many affected?

CASCADE INDICATORS:
- Words: "stops", "blocks", "delays", "waiting", "escalates", "production halt"
- Patterns: Multiple teams involved, time-sensitive, external dependencies

VAGUENESS INDICATORS:
- Words: "sometimes", "usually", "often", "various", "multiple"
- No specific numbers, times, or examples

Output JSON only:
{
  "cascadeScore": 0-10,
  "specificityScore": 0-10,
  "isRootCause": boolean,
  "isCompensatingWork": boolean,
  "secondOrderEffects": "describe the failure cascade path",
  "mentalModelMismatch": "what they think vs what it really is",
  "nextAction": "CASCADE_PROBE" | "FORCE_SPECIFICITY" | "VALIDATE_EIGENQUESTION" | "MOVE_ON" | "NEW_WORKFLOW",
  "reasoning": "Internal analysis explaining your decision"
}"#
    }

    /// User prompt for the scoring pass, with the advisory policy rules
    /// rendered from the configured thresholds.
    pub fn scoring_user(
        response: &str,
        industry: &str,
        department: &str,
        previous: &[Exchange],
        workflow_depth: usize,
        workflow_count: usize,
        policy: &PolicyThresholds,
    ) -> String {
        let previous_json =
            serde_json::to_string(previous).unwrap_or_else(|_| "[]".to_string());

        format!(
            r#"Industry: {industry}
Department: {department}
Workflows analyzed: {workflow_count}
Previous context: {previous_json}
Current workflow depth: {workflow_depth}

User's latest response: "{response}"

Analyze and decide next action.

Rules:
- If cascadeScore >= {ch} AND specificityScore < {sf}: FORCE_SPECIFICITY
- If cascadeScore >= {ch} AND currentWorkflowDepth >= {vd}: VALIDATE_EIGENQUESTION
- If cascadeScore >= {ch} AND specificityScore >= {sf}: CASCADE_PROBE (go deeper)
- If cascadeScore < {cl}: MOVE_ON (or NEW_WORKFLOW if depth > 0)
- If specificityScore < {sv}: FORCE_SPECIFICITY"#,
            ch = policy.cascade_high,
            sf = policy.specificity_floor,
            vd = policy.validation_depth,
            cl = policy.cascade_low,
            sv = policy.specificity_vague,
        )
    }

    /// System prompt for question generation, specialized to the industry
    pub fn question_system(industry: &str) -> String {
        format!(
            r#"You are an operations diagnostic expert specializing in {industry} operations. Generate the next question based on the analysis.

TONE PRINCIPLES:
1. Respectful Challenge - "Most people think X. Here's what the data reveals."
2. Industry Credibility - Use specific {industry} language and patterns
3. Pattern Recognition - "I've seen this at similar {industry} companies"
4. Socratic Precision - Probe causes, not symptoms
5. Progressive Build - Reveal patterns as they emerge

NEVER:
- Use jargon (eigenquestion, mental models, cascade theory, second-order effects)
- Explain your reasoning process or frameworks
- Accept vague answers without probing
- Ask generic questions
- Use emojis or casual language

ALWAYS:
- Explain WHY the question matters to THEIR specific situation
- Use concrete {industry} examples when explaining
- Distinguish cascade failures (blocks others) from efficiency waste (just slow)
- Challenge weak answers respectfully with industry authority
- Show you understand {industry} patterns

QUESTION TYPES:

CASCADE_PROBE (go 3 levels deeper):
- "When this fails, what breaks FIRST?"
- "Walk me through last month's worst incident"
- "How many hours does ONE failure cost across all teams?"
- "If this NEVER failed again, what specific changes would you see?"

FORCE_SPECIFICITY (demand concrete examples):
- "Let's get concrete. Last week specifically - how many hours? Which suppliers?"
- "Show me an actual example from this month"
- "Give me numbers: How many times? How long? Who was involved?"

VALIDATE_EIGENQUESTION (test standalone value):
- "Quick validation: If I automate ONLY this task, would your team use it tomorrow?"
- "Does this failure directly cause production stops, or is it just inefficient?"
- "Would you pay for just this automation, nothing else?"

MOVE_ON (shallow dive, next workflow):
- "Got it. That's efficiency work but not mission-critical. What's another major coordination task?"

NEW_WORKFLOW (finish current, start new):
- "I see the pattern here. Let's look at another workflow. What's your second-biggest coordination bottleneck?""#
        )
    }

    /// User prompt for question generation
    pub fn question_user(
        record: &ScoreRecord,
        industry: &str,
        workflow_depth: usize,
        workflow_count: usize,
        user_response: &str,
    ) -> String {
        let mut prompt = format!(
            r#"Analysis Results:
- Cascade Score: {}/10
- Specificity Score: {}/10
- Is Root Cause: {}
- Is Compensating Work: {}
- Second Order Effects: {}
- Mental Model Mismatch: {}
- Next Action: {}
- Internal Reasoning: {}

Context:
- Industry: {industry}
- Workflows analyzed: {workflow_count}
- Current workflow depth: {workflow_depth}
- User response: "{user_response}"

Generate the next question that:
1. Matches the Next Action type
2. Explains WHY this matters to {industry} specifically
3. Uses industry-specific language"#,
            record.cascade_score.value(),
            record.specificity_score.value(),
            record.is_root_cause,
            record.is_compensating_work,
            record.second_order_effects,
            record.mental_model_mismatch,
            record.next_action,
            record.reasoning,
        );

        let emphasis = match record.next_action {
            crate::diagnostic::action::NextAction::CascadeProbe => {
                Some("Goes deeper on the failure cascade path")
            }
            crate::diagnostic::action::NextAction::ForceSpecificity => {
                Some("Demands concrete numbers and examples")
            }
            crate::diagnostic::action::NextAction::ValidateEigenquestion => {
                Some("Tests if this is truly the one problem worth solving first")
            }
            _ => None,
        };
        if let Some(line) = emphasis {
            prompt.push_str(&format!("\n4. {line}"));
        }

        prompt.push_str(&format!(
            r#"

Return JSON only:
{{
  "question": "The actual question to ask",
  "explanation": "Why this matters to their specific {industry} situation (1-2 sentences)"
}}"#
        ));

        prompt
    }

    /// System prompt for cross-workflow pattern detection
    pub fn pattern_system(industry: &str) -> String {
        let mut prompt = format!(
            r#"You are an operations diagnostic expert analyzing {industry} workflows for cross-workflow patterns.

PATTERN TYPES TO DETECT:

1. UPSTREAM_FAILURE: Same root cause breaks multiple workflows
   - Example: Supplier doesn't send updates -> 3 teams chase same information
   - Signal: Multiple workflows mention same external party/system

2. INFORMATION_GAP: Multiple teams hunting same data from same source
   - Example: Everyone calling logistics, accounting, suppliers for status
   - Signal: Multiple "tracking" or "checking" or "calling for status" tasks

3. HANDOFF_FAILURE: Same coordination point fails repeatedly
   - Example: Warehouse -> Production handoff always delayed
   - Signal: Multiple workflows mention same department boundary

4. REACTIVE_TRACKING: All workflows are compensating for lack of proactive updates
   - Example: Call suppliers (reactive) vs suppliers auto-notify (proactive)
   - Signal: Words like "chase", "follow up", "check status", "call to confirm"

ANALYSIS APPROACH:
1. Look for common triggers across workflows
2. Identify if workflows are ROOT tasks or COMPENSATING tasks
3. Check if multiple workflows solve the SAME underlying problem differently
4. Detect information flow gaps (proactive vs reactive)
"#
        );

        if industry == "automotive" {
            prompt.push_str(
                r#"
AUTOMOTIVE-SPECIFIC PATTERNS:
- Supplier coordination cascades (affects assembly line directly)
- CKD part tracking (customs delays cascade to production)
- Quality issue escalation (stops line if not caught early)
"#,
            );
        }

        if industry == "logistics" {
            prompt.push_str(
                r#"
LOGISTICS-SPECIFIC PATTERNS:
- Carrier coordination (demurrage fees if late)
- Customs clearance tracking (delays cascade to delivery)
- Route optimization (affects multiple shipments)
"#,
            );
        }

        prompt.push_str(
            r#"
Output JSON only:
{
  "patternDetected": boolean,
  "patternType": "upstream_failure" | "information_gap" | "handoff_failure" | "reactive_tracking" | "none",
  "confidence": 0-100,
  "description": "Clear explanation of the pattern you detected",
  "hypothesis": "Your theory about the real root problem",
  "affectedWorkflows": [array of 0-based workflow indices that share this pattern],
  "commonTrigger": "What triggers all these workflows (if same)",
  "recommendation": "What to explore next to validate this pattern"
}"#,
        );

        prompt
    }

    /// User prompt for pattern detection over the closed workflows
    pub fn pattern_user(workflows: &[Workflow], industry: &str) -> String {
        let mut prompt = format!(
            "Industry: {industry}\nNumber of workflows: {}\n\nWorkflows to analyze:\n",
            workflows.len()
        );
        for (i, workflow) in workflows.iter().enumerate() {
            prompt.push_str(&format!(
                "\nWorkflow {} (cascade score {}):\n{}\n",
                i,
                workflow.cascade_score().value(),
                workflow.transcript_json()
            ));
        }
        prompt.push_str("\nAnalyze for cross-workflow patterns.");
        prompt
    }

    /// System prompt for the eigenquestion validation gates
    pub fn validation_system() -> &'static str {
        r#"You are an operations diagnostic expert validating whether a workflow is truly the one problem worth solving first.

VALIDATION CRITERIA:

1. STANDALONE VALUE TEST:
   - Would they use ONLY this automation tomorrow (nothing else)?
   - Would they pay for JUST this feature?
   - Would it be used daily/weekly actively?

2. CASCADE EFFECT TEST:
   - Does failure STOP someone else's work?
   - Does it escalate to executive level?
   - How many teams/people are blocked when it fails?

3. ROOT CAUSE TEST:
   - Is this the ACTUAL problem or compensating work?
   - Inversion: If task never existed, would operations improve?
   - Is it reactive tracking (symptom) or proactive gap (cause)?

VALIDATION PROCESS:
- Score each criterion (0-10)
- Acceptance requires: Standalone >= 8, Cascade >= 7, Root Cause >= 8
- If ANY criterion fails, provide 2-3 specific probing questions

Output JSON only:
{
  "isEigenquestion": boolean,
  "confidence": 0-100,
  "reasoning": "Clear explanation of why this is/isn't the right problem",
  "scores": {
    "standaloneValue": 0-10,
    "cascadeEffect": 0-10,
    "rootCause": 0-10
  },
  "failurePoints": {
    "standaloneValue": boolean (true if passed),
    "cascadeEffect": boolean (true if passed),
    "rootCause": boolean (true if passed)
  },
  "questions": ["If validation fails, list 2-3 specific questions to probe deeper"],
  "redFlags": ["Specific concerns about this workflow"]
}"#
    }

    /// User prompt for validating one candidate workflow
    pub fn validation_user(workflow: &Workflow, industry: &str) -> String {
        format!(
            "Industry: {industry}\n\nWorkflow to validate (cascade score {}):\n{}\n\nValidate if this is THE problem to solve first.",
            workflow.cascade_score().value(),
            workflow.transcript_json()
        )
    }

    /// System prompt for per-department aggregation
    pub fn aggregation_system() -> &'static str {
        "You are an operations diagnostic expert. Use eigenquestion theory, cascade analysis, \
         and inversion testing to find the ONE critical problem. Be rigorous - many \"problems\" \
         are actually symptoms of deeper coordination failures."
    }

    /// User prompt for per-department aggregation over all workflows
    pub fn aggregation_user(workflows: &[Workflow], department: &str) -> String {
        let workflows_json =
            serde_json::to_string_pretty(workflows).unwrap_or_else(|_| "[]".to_string());

        format!(
            r#"You are an operations diagnostic expert specializing in eigenquestion discovery. You've diagnosed coordination failures at 50+ companies.

FRAMEWORKS TO APPLY (Internal use only - never mention to user):

1. EIGENQUESTION TEST:
   - ROOT CAUSE vs SYMPTOM: Is this the actual problem or compensating work?
   - CASCADE DEPTH: How many teams/processes stop when this fails?
   - STANDALONE VALUE: Would they use ONLY this automation daily?
   - INVERSION TEST: If this task never existed, would operations improve?

2. SECOND-ORDER EFFECTS:
   - Trace failure path 3 levels deep
   - Count affected people/teams/customers
   - Measure time to executive escalation

3. MENTAL MODEL MISMATCH:
   - What do they THINK the problem is?
   - What is it ACTUALLY?
   - Are they optimizing symptoms vs fixing root cause?

4. PATTERN RECOGNITION:
   - UPSTREAM FAILURE: Same root cause breaks multiple workflows
   - INFORMATION GAP: Multiple teams hunting same data
   - REACTIVE TRACKING: Compensating for lack of proactive updates
   - HANDOFF FAILURE: Same coordination point fails repeatedly

ANALYSIS APPROACH:

Department: {department}
Workflows analyzed: {count}

Workflows:
{workflows_json}

Step 1: For each workflow, score:
- Cascade Score (0-10): How many downstream failures?
- Specificity Score (0-10): Concrete vs vague answers?
- Root Cause Score (0-10): Actual problem vs symptom?

Step 2: Identify patterns across workflows:
- Do multiple workflows solve the SAME underlying problem differently?
- Are they all reactive tracking (symptom) of same information gap (cause)?
- Is there a common upstream failure?

Step 3: Apply Inversion Test:
- Which workflow, if it NEVER existed, would improve operations?
- If YES -> it's compensating work, not the eigenquestion
- If NO -> potential eigenquestion candidate

Step 4: Select THE eigenquestion:
- Highest cascade score
- Most teams affected
- Stops at executive escalation level
- Would prevent most firefighting
- Has standalone value (they'd use only this)
- Break remaining ties by highest cascade score, then most affected teams, then earliest workflow

Return JSON ONLY:
{{
  "eigenquestion": "Clear, specific question that if answered proactively would prevent cascade",
  "reasoning": "Multi-paragraph explanation using specific evidence from workflows. Explain: 1) What the cascade path is, 2) Why this is root cause not symptom, 3) What mental model mismatch exists, 4) Why this has standalone value. Use industry-specific language.",
  "cascadeAnalysis": {{
    "triggerWorkflow": "Which workflow triggers the cascade",
    "firstOrderEffects": "Immediate consequences when it fails",
    "secondOrderEffects": "What breaks next",
    "thirdOrderEffects": "Final escalation point",
    "affectedTeams": ["team1", "team2"],
    "executiveEscalation": true/false
  }},
  "totalValue": number (monthly cost of failures across all affected workflows),
  "patterns": ["Specific patterns found"],
  "mentalModelMismatch": "What they think vs what the real problem is",
  "successMetrics": ["Concrete, measurable 2-week pilot metrics"],
  "confidence": number (0-100, how confident you are this is THE eigenquestion)
}}"#,
            count = workflows.len(),
        )
    }

    /// System prompt for the organization-wide synthesis
    pub fn global_system() -> &'static str {
        "You are a strategic operations analyst examining organization-wide patterns. Find \
         cross-departmental root causes and optimal automation sequences."
    }

    /// User prompt for the organization-wide synthesis
    pub fn global_user(analyses: &[DepartmentSummary], organization: &str) -> String {
        let analyses_json =
            serde_json::to_string_pretty(analyses).unwrap_or_else(|_| "[]".to_string());

        format!(
            r#"You are analyzing an entire organization's workflows to find the GLOBAL EIGENQUESTION.

Organization: {organization}

Department Analyses:
{analyses_json}

Identify:
1. The ONE cross-departmental pattern that's the root cause
2. The sequence of automation (which department to fix first, then second, etc.)
3. Total organization value if all are automated
4. Cross-department patterns

Return as JSON:
{{
  "globalEigenquestion": "string",
  "reasoning": "string",
  "crossDepartmentPatterns": ["pattern1"],
  "prioritySequence": [
    {{"department": "string", "workflow": "string", "value": number}}
  ],
  "totalOrganizationValue": number
}}"#
        )
    }
}
