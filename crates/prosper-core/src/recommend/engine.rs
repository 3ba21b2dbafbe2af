//! Recommendation Engine - turns scorer results into prioritized advice

use chrono::{DateTime, NaiveTime, TimeZone, Utc};
use tracing::{debug, info, warn};

use crate::analysis::{Analyzer, Classifier};
use crate::models::{
    BookReference, Classification, FinancialGoal, Priority, Transaction, UserFinancialProfile,
};
use crate::rules::{RecommendationRules, Rules};

use super::types::{Difficulty, PersonalizedRecommendations, Recommendation, RecommendationCategory};

/// Category counted by the education recommendation
const EDUCATION_CATEGORY: &str = "education";

/// Length of a month when converting goal deadlines to months
const SECONDS_PER_MONTH: i64 = 30 * 24 * 60 * 60;

fn steps(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Evaluates every recommendation rule independently and buckets the results
pub struct RecommendationEngine<'a> {
    analyzer: Analyzer<'a>,
    rules: &'a RecommendationRules,
}

impl<'a> RecommendationEngine<'a> {
    pub fn new(rules: &'a Rules) -> Self {
        Self {
            analyzer: Analyzer::new(rules),
            rules: &rules.recommendations,
        }
    }

    /// Generate all matching recommendations, bucketed by urgency
    ///
    /// Book rules run in a fixed order (Rich Dad, Psychology of Money,
    /// Babylon, then goals); each bucket keeps that order.
    pub fn generate(
        &self,
        transactions: &[Transaction],
        profile: &UserFinancialProfile,
        goals: Option<&[FinancialGoal]>,
        now: DateTime<Utc>,
    ) -> PersonalizedRecommendations {
        let mut all = Vec::new();
        all.extend(self.rich_dad_recommendations(transactions, profile));
        all.extend(self.psychology_recommendations(transactions, profile));
        all.extend(self.babylon_recommendations(transactions));
        if let Some(goals) = goals {
            all.extend(self.goal_recommendations(goals, profile, now));
        }

        let bucketed = categorize(all);
        info!(
            urgent = bucketed.urgent.len(),
            important = bucketed.important.len(),
            suggested = bucketed.suggested.len(),
            educational = bucketed.educational.len(),
            "Generated recommendations"
        );
        bucketed
    }

    fn rich_dad_recommendations(
        &self,
        transactions: &[Transaction],
        profile: &UserFinancialProfile,
    ) -> Vec<Recommendation> {
        let mut recs = Vec::new();
        let ratio = self.analyzer.rich_dad().asset_liability_ratio(transactions, profile);

        if ratio.liabilities_total > ratio.assets_total {
            recs.push(Recommendation {
                id: "pai_rico_assets_vs_liabilities".to_string(),
                title: "Focus on Assets, not Liabilities".to_string(),
                description: "You are spending more on liabilities (things that take money out of \
                              your pocket) than on assets (things that put money into it)."
                    .to_string(),
                priority: Priority::High,
                category: RecommendationCategory::Investing,
                book_reference: BookReference::PaiRico,
                action_steps: steps(&[
                    "Before each purchase ask: \"Will this put money in my pocket or take it out?\"",
                    "Cut back on electronics, expensive cars and luxury items",
                    "Invest in courses, stocks, real estate funds or businesses",
                    "Set a target: 70% of discretionary spending goes to assets",
                ]),
                expected_impact: "More passive income and less unnecessary spending".to_string(),
                timeframe: "3-6 months".to_string(),
                difficulty: Difficulty::Medium,
            });
        }

        let education_spending: f64 = transactions
            .iter()
            .filter(|tx| tx.is_expense() && tx.category == EDUCATION_CATEGORY)
            .map(|tx| tx.amount)
            .sum();

        if education_spending < profile.monthly_income * self.rules.education_income_share {
            recs.push(Recommendation {
                id: "pai_rico_financial_education".to_string(),
                title: "Invest in Financial Education".to_string(),
                description: "Your most important asset is your mind, and you are investing very \
                              little in financial education."
                    .to_string(),
                priority: Priority::High,
                category: RecommendationCategory::Education,
                book_reference: BookReference::PaiRico,
                action_steps: steps(&[
                    "Set aside at least 3% of your income for education",
                    "Read books about investing and personal finance",
                    "Take online courses about financial markets",
                    "Join a group of investors",
                    "Follow channels that specialize in finance",
                ]),
                expected_impact: "Better financial decisions and higher income".to_string(),
                timeframe: "1-3 months".to_string(),
                difficulty: Difficulty::Easy,
            });
        }

        recs
    }

    fn psychology_recommendations(
        &self,
        transactions: &[Transaction],
        profile: &UserFinancialProfile,
    ) -> Vec<Recommendation> {
        let mut recs = Vec::new();
        let psychology = self.analyzer.psychology();

        let emotional = psychology.emotional_spending(transactions);
        if emotional.emotional_spending > profile.monthly_income * self.rules.emotional_income_share
        {
            recs.push(Recommendation {
                id: "psicologia_emotional_spending".to_string(),
                title: "Control Emotional Spending".to_string(),
                description: "You are spending a lot on emotional impulse. That can undermine \
                              your financial goals."
                    .to_string(),
                priority: Priority::High,
                category: RecommendationCategory::Behavior,
                book_reference: BookReference::Psicologia,
                action_steps: steps(&[
                    "Use the 24-hour rule: wait a day before non-essential purchases",
                    "Identify your emotional triggers (stress, sadness, anxiety)",
                    "Find healthy alternatives for dealing with emotions",
                    "Shop with a list and stick to it",
                    "Practice mindfulness before financial decisions",
                ]),
                expected_impact: "30-50% fewer impulse purchases".to_string(),
                timeframe: "2-4 weeks".to_string(),
                difficulty: Difficulty::Medium,
            });
        }

        let consistency = psychology.consistency(transactions);
        if consistency.consistency_score < self.rules.min_consistency_score {
            recs.push(Recommendation {
                id: "psicologia_consistency".to_string(),
                title: "Build Financial Consistency".to_string(),
                description: "Your spending habits are inconsistent, and consistency is the \
                              foundation of financial success."
                    .to_string(),
                priority: Priority::Medium,
                category: RecommendationCategory::Behavior,
                book_reference: BookReference::Psicologia,
                action_steps: steps(&[
                    "Create a monthly budget and follow it",
                    "Automate savings and investments",
                    "Review your spending every week",
                    "Set fixed financial routines",
                    "Track spending daily with an app",
                ]),
                expected_impact: "More predictability and control over your money".to_string(),
                timeframe: "1-2 months".to_string(),
                difficulty: Difficulty::Medium,
            });
        }

        recs
    }

    fn babylon_recommendations(&self, transactions: &[Transaction]) -> Vec<Recommendation> {
        let mut recs = Vec::new();
        let babylon = self.analyzer.babylon();

        if !babylon.ten_percent_rule(transactions).is_following_rule {
            recs.push(Recommendation {
                id: "babilonia_ten_percent_rule".to_string(),
                title: "Apply the 10% Rule".to_string(),
                description: "You are not keeping at least 10% of your income. This is the \
                              foundation of wealth."
                    .to_string(),
                priority: Priority::High,
                category: RecommendationCategory::Saving,
                book_reference: BookReference::Babilonia,
                action_steps: steps(&[
                    "Pay yourself first: set aside 10% as soon as you are paid",
                    "Open a separate savings account for it",
                    "Automate the transfer on payday",
                    "Treat that money as untouchable",
                    "Raise it gradually to 15% or 20%",
                ]),
                expected_impact: "An emergency fund and a base for investing".to_string(),
                timeframe: "1 month".to_string(),
                difficulty: Difficulty::Easy,
            });
        }

        if babylon.discipline(transactions).discipline_score < self.rules.min_discipline_score {
            recs.push(Recommendation {
                id: "babilonia_discipline".to_string(),
                title: "Strengthen Your Financial Discipline".to_string(),
                description: "Your financial discipline needs work. Discipline is what separates \
                              the rich from the poor."
                    .to_string(),
                priority: Priority::Medium,
                category: RecommendationCategory::Behavior,
                book_reference: BookReference::Babilonia,
                action_steps: steps(&[
                    "Define clear rules for your spending",
                    "Set consequences for breaking them",
                    "Celebrate small wins",
                    "Find an accountability partner",
                    "Practice self-control in small daily decisions",
                ]),
                expected_impact: "More control over impulses and more rational decisions"
                    .to_string(),
                timeframe: "2-3 months".to_string(),
                difficulty: Difficulty::Hard,
            });
        }

        recs
    }

    fn goal_recommendations(
        &self,
        goals: &[FinancialGoal],
        profile: &UserFinancialProfile,
        now: DateTime<Utc>,
    ) -> Vec<Recommendation> {
        let mut recs = Vec::new();
        let today = now.date_naive();

        for goal in goals {
            let remaining = goal.remaining();
            if !goal.is_active() || remaining <= 0.0 {
                continue;
            }

            if goal.deadline < today {
                warn!(goal = %goal.id, deadline = %goal.deadline, "Goal is past its deadline");
                recs.push(overdue_goal(goal, remaining));
                continue;
            }

            let months_remaining = months_until(goal, now);
            let monthly_needed = remaining / months_remaining as f64;
            let income_share = monthly_needed / profile.monthly_income;
            debug!(
                goal = %goal.id,
                months_remaining,
                monthly_needed,
                "Goal feasibility"
            );

            if income_share > self.rules.goal_income_share {
                recs.push(Recommendation {
                    id: format!("goal_adjustment_{}", goal.id),
                    title: format!("Adjust the Goal: {}", goal.title),
                    description: format!(
                        "To reach your goal \"{}\" you would need to save {:.1}% of your monthly \
                         income, which may not be sustainable.",
                        goal.title,
                        income_share * 100.0
                    ),
                    priority: Priority::Medium,
                    category: RecommendationCategory::Saving,
                    book_reference: BookReference::Psicologia,
                    action_steps: steps(&[
                        "Move the deadline to something more realistic",
                        "Consider lowering the target amount",
                        "Look for extra sources of income",
                        "Trim spending to free up more money",
                        "Split the goal into smaller milestones",
                    ]),
                    expected_impact: "A more achievable goal and less financial stress"
                        .to_string(),
                    timeframe: "1 week".to_string(),
                    difficulty: Difficulty::Easy,
                });
            }
        }

        recs
    }

    /// Advice for one large expense, if it warrants any
    ///
    /// Only expenses above the configured share of monthly income are
    /// reviewed. A liability wins over an emotional purchase; at most one
    /// recommendation is returned.
    pub fn transaction_recommendation(
        &self,
        tx: &Transaction,
        profile: &UserFinancialProfile,
    ) -> Option<Recommendation> {
        if !tx.is_expense() || tx.amount <= profile.monthly_income * self.rules.transaction_income_share
        {
            return None;
        }

        let classifier: Classifier<'_> = self.analyzer.classifier();
        if classifier.effective(tx, profile) == Classification::Liability {
            return Some(Recommendation {
                id: format!("transaction_{}_liability", tx.id),
                title: "Careful with this Liability".to_string(),
                description: format!(
                    "You spent {:.2} on \"{}\". According to Rich Dad, this is a liability that \
                     takes money out of your pocket.",
                    tx.amount, tx.description
                ),
                priority: Priority::High,
                category: RecommendationCategory::Spending,
                book_reference: BookReference::PaiRico,
                action_steps: steps(&[
                    "Ask yourself whether this purchase was really necessary",
                    "Consider selling the item if it adds no value",
                    "Next time, think: \"Will this make me richer or poorer?\"",
                    "Put this amount toward assets in the future",
                ]),
                expected_impact: "Less spent on liabilities and more focus on assets".to_string(),
                timeframe: "Immediate".to_string(),
                difficulty: Difficulty::Easy,
            });
        }

        if self
            .rules
            .transaction_emotional_states
            .contains(&tx.emotional_state)
        {
            return Some(Recommendation {
                id: format!("transaction_{}_emotional", tx.id),
                title: "Emotional Purchase Detected".to_string(),
                description: format!(
                    "You made a {:.2} purchase while feeling {}. The Psychology of Money teaches \
                     that emotions can cloud financial decisions.",
                    tx.amount, tx.emotional_state
                ),
                priority: Priority::Medium,
                category: RecommendationCategory::Behavior,
                book_reference: BookReference::Psicologia,
                action_steps: steps(&[
                    "Reflect on what you were feeling when you bought it",
                    "Look for emotional patterns in your spending",
                    "Plan how to handle those emotions next time",
                    "Use the 24-hour rule for future purchases",
                ]),
                expected_impact: "More emotional awareness in financial decisions".to_string(),
                timeframe: "1 week".to_string(),
                difficulty: Difficulty::Medium,
            });
        }

        None
    }
}

/// Place each recommendation in exactly one bucket, preserving order
pub fn categorize(recommendations: Vec<Recommendation>) -> PersonalizedRecommendations {
    let mut bucketed = PersonalizedRecommendations::default();
    for rec in recommendations {
        bucketed.push(rec);
    }
    bucketed
}

/// Whole 30-day months from `now` to the end of the deadline day, at least 1
fn months_until(goal: &FinancialGoal, now: DateTime<Utc>) -> i64 {
    let deadline = Utc.from_utc_datetime(&goal.deadline.and_time(NaiveTime::MIN));
    let seconds = (deadline - now).num_seconds();
    let months = seconds.div_euclid(SECONDS_PER_MONTH)
        + i64::from(seconds.rem_euclid(SECONDS_PER_MONTH) != 0);
    months.max(1)
}

fn overdue_goal(goal: &FinancialGoal, remaining: f64) -> Recommendation {
    Recommendation {
        id: format!("goal_overdue_{}", goal.id),
        title: format!("Goal Overdue: {}", goal.title),
        description: format!(
            "The deadline for \"{}\" was {} and {:.2} is still missing.",
            goal.title, goal.deadline, remaining
        ),
        priority: Priority::High,
        category: RecommendationCategory::Saving,
        book_reference: BookReference::Babilonia,
        action_steps: steps(&[
            "Set a new, realistic deadline",
            "Work out the monthly amount the new deadline requires",
            "Automate that amount on payday",
            "Pause the goal if other priorities come first",
        ]),
        expected_impact: "A goal that reflects where you really are".to_string(),
        timeframe: "1 week".to_string(),
        difficulty: Difficulty::Easy,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EmotionalState, GoalStatus};
    use crate::test_utils::{at, expense, feeling, fixed_now, goal, income, profile};
    use chrono::NaiveDate;

    fn ids(recs: &[Recommendation]) -> Vec<&str> {
        recs.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn test_empty_input_recommendations() {
        let rules = Rules::default();
        let engine = RecommendationEngine::new(&rules);

        let recs = engine.generate(&[], &profile(5000.0), None, fixed_now());
        // No income means the ten-percent rule fails; no education spending
        assert_eq!(ids(&recs.urgent), vec!["babilonia_ten_percent_rule"]);
        assert_eq!(ids(&recs.important), vec!["pai_rico_financial_education"]);
        assert!(recs.suggested.is_empty());
        assert!(recs.educational.is_empty());
    }

    #[test]
    fn test_all_book_rules_fire() {
        let rules = Rules::default();
        let engine = RecommendationEngine::new(&rules);
        let txs = vec![
            income(2000.0, "salary"),
            feeling(expense(900.0, "luxury", "designer bag"), EmotionalState::Stressed),
            expense_on_day(3, 100.0),
            expense_on_day(20, 1500.0),
        ];

        let recs = engine.generate(&txs, &profile(2000.0), None, fixed_now());
        assert_eq!(
            ids(&recs.urgent),
            vec!["psicologia_emotional_spending", "babilonia_ten_percent_rule"]
        );
        assert_eq!(
            ids(&recs.important),
            vec!["pai_rico_assets_vs_liabilities", "pai_rico_financial_education"]
        );
        assert_eq!(
            ids(&recs.suggested),
            vec!["psicologia_consistency", "babilonia_discipline"]
        );
    }

    fn expense_on_day(day: u32, amount: f64) -> Transaction {
        let mut tx = expense(amount, "living", "monthly costs");
        tx.date = at(2026, 10, day);
        tx
    }

    #[test]
    fn test_healthy_user_gets_nothing() {
        let rules = Rules::default();
        let engine = RecommendationEngine::new(&rules);
        let txs = vec![
            income(5000.0, "salary"),
            expense(400.0, "education", "online class"),
            expense(300.0, "investment", "index fund"),
        ];

        let recs = engine.generate(&txs, &profile(5000.0), None, fixed_now());
        assert!(recs.is_empty(), "unexpected: {:?}", ids(&recs.iter().cloned().collect::<Vec<_>>()));
    }

    #[test]
    fn test_feasible_goal_has_no_adjustment() {
        let rules = Rules::default();
        let engine = RecommendationEngine::new(&rules);
        // About 330 days away: 11 months, 2727.27/month = 22.7% of income
        let deadline = NaiveDate::from_ymd_opt(2027, 9, 12).unwrap();
        let goals = vec![goal("house", 30000.0, 0.0, deadline)];

        assert_eq!(months_until(&goals[0], fixed_now()), 11);
        let recs = engine.generate(&[], &profile(12000.0), Some(&goals), fixed_now());
        assert!(recs.iter().all(|r| !r.id.starts_with("goal_")));
    }

    #[test]
    fn test_aggressive_goal_is_flagged() {
        let rules = Rules::default();
        let engine = RecommendationEngine::new(&rules);
        let deadline = NaiveDate::from_ymd_opt(2027, 1, 15).unwrap();
        let goals = vec![goal("car", 30000.0, 0.0, deadline)];

        let recs = engine.generate(&[], &profile(5000.0), Some(&goals), fixed_now());
        assert_eq!(ids(&recs.suggested), vec!["goal_adjustment_car"]);
        assert!(recs.suggested[0].description.contains("200.0%"));
    }

    #[test]
    fn test_goal_due_today_uses_one_month() {
        let deadline = fixed_now().date_naive();
        let g = goal("today", 100.0, 0.0, deadline);
        assert_eq!(months_until(&g, fixed_now()), 1);
    }

    #[test]
    fn test_overdue_goal_is_urgent() {
        let rules = Rules::default();
        let engine = RecommendationEngine::new(&rules);
        let deadline = NaiveDate::from_ymd_opt(2026, 9, 1).unwrap();
        let goals = vec![goal("trip", 5000.0, 1000.0, deadline)];

        let recs = engine.generate(&[], &profile(5000.0), Some(&goals), fixed_now());
        assert!(ids(&recs.urgent).contains(&"goal_overdue_trip"));
        assert!(recs.iter().all(|r| r.id != "goal_adjustment_trip"));
    }

    #[test]
    fn test_inactive_and_reached_goals_are_skipped() {
        let rules = Rules::default();
        let engine = RecommendationEngine::new(&rules);
        let deadline = NaiveDate::from_ymd_opt(2026, 11, 1).unwrap();
        let mut paused = goal("paused", 90000.0, 0.0, deadline);
        paused.status = GoalStatus::Paused;
        let reached = goal("reached", 1000.0, 1000.0, deadline);

        let recs = engine.generate(&[], &profile(1000.0), Some(&[paused, reached]), fixed_now());
        assert!(recs.iter().all(|r| !r.id.starts_with("goal_")));
    }

    #[test]
    fn test_transaction_recommendation_liability_first() {
        let rules = Rules::default();
        let engine = RecommendationEngine::new(&rules);
        let p = profile(5000.0);

        let mut tx = feeling(expense(800.0, "luxury", "watch"), EmotionalState::Excited);
        tx.id = "t1".into();
        let rec = engine.transaction_recommendation(&tx, &p).unwrap();
        assert_eq!(rec.id, "transaction_t1_liability");
        assert_eq!(rec.priority, Priority::High);
    }

    #[test]
    fn test_transaction_recommendation_emotional() {
        let rules = Rules::default();
        let engine = RecommendationEngine::new(&rules);
        let p = profile(5000.0);

        let mut tx = feeling(expense(600.0, "groceries", "big supermarket run"), EmotionalState::Sad);
        tx.id = "t2".into();
        let rec = engine.transaction_recommendation(&tx, &p).unwrap();
        assert_eq!(rec.id, "transaction_t2_emotional");
        assert_eq!(rec.category, RecommendationCategory::Behavior);
    }

    #[test]
    fn test_transaction_recommendation_absent() {
        let rules = Rules::default();
        let engine = RecommendationEngine::new(&rules);
        let p = profile(5000.0);

        // Exactly 10% of income is not above the threshold
        let small = feeling(expense(500.0, "luxury", "watch"), EmotionalState::Excited);
        assert!(engine.transaction_recommendation(&small, &p).is_none());

        let calm = expense(600.0, "groceries", "big supermarket run");
        assert!(engine.transaction_recommendation(&calm, &p).is_none());

        let salary = feeling(income(9000.0, "salary"), EmotionalState::Excited);
        assert!(engine.transaction_recommendation(&salary, &p).is_none());
    }
}
