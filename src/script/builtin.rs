//! The built-in Performance Advisor conversation.

use super::{Illustration, Message, Presentation, Script, Step};

const INTRO: &str = "Hello! I'm your Performance Advisor assistant. I can help you analyze database performance, identify bottlenecks, and recommend optimizations to keep your YugabyteDB clusters running smoothly. Let's dig in and make your system faster and more efficient!\n\nHere’s what I can do:\n- Identify Issues – Detect anomalies, locking problems, or slowdowns.\n- Analyze Queries – Find your most expensive queries and suggest optimizations.\n- Recommend Fixes – Provide steps to resolve performance bottlenecks.\n- Explain Trends – Help you understand why performance changed over time.";

const OVERVIEW_ANSWER: &str = "Here is the current view of cluster activity. Highlights indicate issue windows. See summary below.";

const ANOMALIES_ANSWER: &str = "Yes — there were two anomalies during this period.\n\n1) Lock Contention (Primary)\n   - Affected query:\n     insert into test_table (k, v, t) select max(k) + $1 as k, max(v) + $2 as v, now() as t from test_table\n   - This statement is responsible for over 50% of lock wait time.\n   - Resolution: commit immediately after the insert to release the lock sooner.\n\n2) Catalog Read waits (Secondary)\n   - Over 50% of processing time for a handful of one‑off DDL statements.\n   - Impact is low since these are not frequent. If these DDLs are often run, pre‑cache table metadata with ysql_catalog_preload_additional_table_list.";

const QUERIES_ANSWER: &str = "Top queries are listed below by total execution time. Look at the Queries tab below the Cluster Load chart to the left. The range predicate on pgbench_accounts dominates during those intervals. The top query of import is: insert into test_table (k, v, t) select max(k) + $1 as k, max(v) + $2 as v, now() as t from test_table — it is running into locking issues that will be solved by committing immediately after the insert.\n\nAnother notable query is: SELECT sum(A.id) FROM A JOIN B ON A.category = B.filter_category — it represents over 50% of the CPU time on the cluster, though overall OS CPU utilization is not a concern, remaining under 30%.";

const TUNING_ANSWER: &str = "Optimization details below.";

pub(super) fn performance_advisor() -> Script {
    Script::new(vec![
        Step::new(vec![Message::assistant(INTRO)]).with_presentation(Presentation::RichIntro),
        Step::new(vec![
            Message::user("Can you give me a quick overview of cluster load?"),
            Message::assistant(OVERVIEW_ANSWER),
        ])
        .with_presentation(Presentation::RichFindings)
        .with_thinking()
        .with_illustration(Illustration::Highlighted),
        Step::new(vec![
            Message::user("Any anomalies in the last hour?"),
            Message::assistant(ANOMALIES_ANSWER),
        ])
        .with_presentation(Presentation::RichAnomalies)
        .with_thinking()
        .with_illustration(Illustration::Anomalies),
        Step::new(vec![
            Message::user("Which queries contributed most to those spikes?"),
            Message::assistant(QUERIES_ANSWER),
        ])
        .with_presentation(Presentation::RichQueries)
        .with_thinking()
        .with_illustration(Illustration::Queries),
        Step::new(vec![
            Message::user("Are there any queries that need tuning"),
            Message::assistant(TUNING_ANSWER),
        ])
        .with_presentation(Presentation::RichTuning)
        .with_thinking(),
    ])
}
