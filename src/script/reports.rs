//! Pre-written report fragments rendered by the rich presentations.
//!
//! All fragments are markdown; the chat view renders them through
//! `MarkdownRenderer`.

use super::Presentation;

pub const INTRO: &str = r#"Hello! I'm your Performance Advisor assistant. I can help you analyze database performance, identify bottlenecks, and recommend optimizations to keep your YugabyteDB clusters running smoothly. Let's dig in and make your system faster and more efficient!

**Here’s what I can do:**

- **Identify Issues** — Detect anomalies, locking problems, or slowdowns.
- **Analyze Queries** — Find your most expensive queries and suggest optimizations.
- **Recommend Fixes** — Provide steps to resolve performance bottlenecks.
- **Explain Trends** — Help you understand why performance changed over time.
"#;

pub const FINDINGS: &str = r#"## Issues Found

**1 Important** · **3 Minor**

## Top Findings

### Important — Locking Issues

The following query spends over 50% of its time waiting for locks and is responsible for the majority of total lock wait time on the cluster:

```sql
INSERT INTO test_table (k, v, t)
SELECT max(k) + $1 AS k, max(v) + $2 AS v, now() AS t
FROM test_table;
```

### Minor - CPU optimization

The query is responsible for half of all CPU time, yet total OS CPU utilization remains low, under 30%.

`SELECT sum(A.id) FROM A JOIN B ON A.category = B.filter_category`

### Minor - Catalog Reads

Several statements hit the catalog read anomaly but they are DDL, so of little concern.

### Minor - Hot Tablet

There is one hot tablet but total activity on this table represents less 5% of all cluster activity.

## Next Steps

**Issue Detected:** Lock Contention

Locking is the primary performance bottleneck in your cluster, representing the majority of time spent running queries. The contention area is highlighted in the Cluster Load chart to the left on the Perf Advisor dashboard.

**Solution:** Commit immediately after the insert, as the current insert is part of a transaction that delays the commit. Committing immediately after the insert reduces lock wait time. Expected improvement: reduce query latency by about 50%.

### Insert statement

```sql
INSERT INTO test_table (k, v, t)
SELECT max(k) + $1 AS k, max(v) + $2 AS v, now() AS t
FROM test_table;
```
"#;

pub const ANOMALIES: &str = r#"## Anomalies Summary

Yes — there were **two anomalies** during this period.

### Lock Contention (Primary)

*Affected query*

```sql
insert into test_table (k, v, t)
select max(k) + $1 as k, max(v) + $2 as v, now() as t
from test_table
```

- Responsible for **over 50% of lock wait time**.
- **Resolution:** commit immediately after the insert to release the lock sooner.

### Catalog Read waits (Secondary)

- **Over 50% of processing time** for a handful of one‑off DDL statements.
- Impact is low since these are infrequent. If they are run often, pre‑cache table metadata with `ysql_catalog_preload_additional_table_list`.

Catalog read waits can be avoided by pre-caching the table metadata with the gflag:

```
ysql_catalog_preload_additional_table_list="test_table, test,pgbench_history"
```
"#;

pub const QUERIES: &str = r#"## Top Queries

Top queries are listed below by total execution time. Look at the **Queries** tab below the Cluster Load chart to the left.

### Locking — INSERT into test_table

```sql
insert into test_table (k, v, t)
select max(k) + $1 as k, max(v) + $2 as v, now() as t
from test_table
```

- The majority of active cluster load was spent waiting for locks. This statement is responsible the majority of lock wait time and spends over 50% of its execution time waiting for locks.
- **Resolution:** commit immediately after the insert.

### CPU — SELECT sum(A.id) ...

```sql
SELECT sum(A.id) FROM A JOIN B ON A.category = B.filter_category
```

- Represents **over 50% of CPU time** for the period.
- Overall OS CPU utilization remains **under 30%**, so system-wide CPU is not a concern.

### Catalog Read

The following DDL queries spend more than 50% of time on catalog read

```sql
CREATE TABLE test_table(k i...
DROP TABLE IF EXISTS test.i...
DROP TABLE IF EXISTS test.t...
TRUNCATE pgbench_history;
```

Catalog read waits can be avoided by pre-caching the table metadata with the gflag:

```
ysql_catalog_preload_additional_table_list="test_table, test,pgbench_histoy"
```
"#;

pub const TUNING: &str = r#"## SQL Optimization Recommendation

The one primary SQL optimization is tuning the query:

```sql
SELECT *
FROM pgbench_accounts
WHERE aid BETWEEN $1 AND $2 + $3
ORDER BY abalance DESC
LIMIT $4
```

## Explanation

The query performs a sequential scan on the `pgbench_accounts` table because there is no suitable index to satisfy the range condition `aid BETWEEN $1 AND $2 + $3`. In YugabyteDB, primary keys are HASH partitioned by default. A HASH index is efficient for point lookups (e.g., `WHERE aid = ?`) but does not store data in a sorted order. Consequently, to find all rows where `aid BETWEEN $1 AND $2 + $3`, the database must scan all rows and apply the filter, which is inefficient.

## Recommended Index Strategy

Since the primary key is `aid`, you have two options to resolve the sequential scan:

### 1) Recommended — Create a secondary RANGE index

This is often the safest option as it does not change the table's primary key partitioning, preserving distribution for writes and point-reads on the primary key. This new index will be used to optimize range queries on `aid`.

```sql
CREATE INDEX pgbench_accounts_aid_idx ON pgbench_accounts (aid ASC);
```

### 2) Alternatively recreate the table with a RANGE partitioned primary key

If range queries on `aid` are the most frequent and critical access pattern, change the primary key to be RANGE partitioned. This makes range scans fastest but may introduce write hotspots if inserts use monotonically increasing `aid` values.

```sql
-- This requires dropping and recreating the table.
CREATE TABLE pgbench_accounts (
  aid BIGINT,
  bid INT,
  abalance INT,
  filler VARCHAR,
  PRIMARY KEY (aid ASC)
);
```
"#;

/// Lead-in line appended before the example report
pub const REPORT_LEAD_IN: &str = "Opened example Query Analysis Report below.";

/// Lines containing these phrases are rendered as red callouts
pub const REPORT_RED_CALLOUTS: &[&str] = &["Sequential Scans Found"];

/// Lines containing these phrases are rendered as yellow callouts
pub const REPORT_YELLOW_CALLOUTS: &[&str] = &["Recommended Index Strategy", "Create RANGE index"];

pub const EXAMPLE_REPORT: &str = r#"# Query Analysis Report

## Top Slow Queries

---

### Query 1

**Analysis of Findings**

- **Sequential Scans Found:** Yes
- **Affected Fields:** The aid column is subject to a sequential scan.
- **Recommended Index Strategy**
  1. The query's range predicate WHERE aid BETWEEN ... results in a Seq Scan because the aid column, which is the primary key, is HASH partitioned by default in YugabyteDB.
  2. To enable efficient range lookups, the table should be recreated with RANGE partitioning on the primary key.
  3. If recreating the table is not an option, create a secondary RANGE index on the aid column.
- **Explanation:** The current HASH partitioned primary key on aid distributes data evenly across nodes but does not maintain a sorted order. Consequently, a query for a range of aid values must scan all tablets to find the matching rows, leading to an inefficient Seq Scan. A RANGE partitioned index (either primary or secondary) stores the data sorted by the aid value, allowing the database to perform a much faster Index Scan by directly accessing only the data within the specified range.

```sql
CREATE TABLE pgbench_accounts (
    aid bigint NOT NULL,
    bid integer,
    abalance integer,
    filler character(84),
    PRIMARY KEY (aid ASC)
);
```

```sql
CREATE INDEX pgbench_accounts_aid_idx ON pgbench_accounts (aid ASC);
```

## Query Analysis

---

#### Query Analysis

This SQL query contains a range predicate.

The range predicate is:

```sql
aid BETWEEN $1 AND $2 + $3
```

This predicate uses the BETWEEN operator to select all rows where the value in the aid column falls within the inclusive range defined by the parameter $1 and the expression $2 + $3.

#### Existing Indexes

- CREATE UNIQUE INDEX pgbench_accounts_pkey ON public.pgbench_accounts USING lsm (aid HASH)
- CREATE INDEX idx_abalance ON public.pgbench_accounts USING lsm (abalance HASH)

---

- Calls: 15272
- Total Exec Time (ms): 103651664.49349204
- Avg Exec Time (ms): 6787.03931989864

#### Query Text

```sql
SELECT *
FROM pgbench_accounts
WHERE aid BETWEEN $1 AND $2 + $3
ORDER BY abalance DESC
LIMIT $4
```

#### Explain Plan

```
[...] shortened plan ...
```

---
"#;

/// Fixed report body for a rich presentation, `None` for plain steps
pub fn fragment(presentation: Presentation) -> Option<&'static str> {
    match presentation {
        Presentation::Plain => None,
        Presentation::RichIntro => Some(INTRO),
        Presentation::RichFindings => Some(FINDINGS),
        Presentation::RichAnomalies => Some(ANOMALIES),
        Presentation::RichQueries => Some(QUERIES),
        Presentation::RichTuning => Some(TUNING),
    }
}
