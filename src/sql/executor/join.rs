use tracing::trace;

use crate::sql::{
    parser::ast::JoinType,
    plan::Expression,
    relation::{Relation, RowRef},
    schema::TableSchema,
    types::{Row, Value},
};

/// Nested loop join
///
/// Compares every left row with every right row, in left-row-major order. For left
/// outer joins an unmatched left row is emitted padded with nulls right after its
/// (absent) matches. For right outer joins the unmatched right rows follow all matched
/// rows, padded with nulls, in right-row order.
pub fn nested_loop_join(
    join_type: JoinType,
    left: Relation,
    right: Relation,
    condition: &Expression,
    schema: &TableSchema,
) -> Relation {
    let mut rows = Vec::new();
    let mut right_matched = vec![false; right.len()];
    for lrow in &left.rows {
        let mut matched = false;
        for (i, rrow) in right.rows.iter().enumerate() {
            let row = combine(lrow, rrow);
            if condition.evaluate(&RowRef::new(schema, &row)).is_true() {
                rows.push(row);
                matched = true;
                right_matched[i] = true;
            }
        }
        if join_type == JoinType::LeftOuter && !matched {
            rows.push(combine(lrow, &right.schema.null_row()));
        }
    }

    if join_type == JoinType::RightOuter {
        let padding = left.schema.null_row();
        for (rrow, _) in right.rows.iter().zip(&right_matched).filter(|(_, m)| !**m) {
            rows.push(combine(&padding, rrow));
        }
    }

    trace!(
        %join_type,
        left = left.len(),
        right = right.len(),
        output = rows.len(),
        "nested loop join"
    );
    Relation {
        schema: schema.clone(),
        rows,
    }
}

fn combine(left: &[Value], right: &[Value]) -> Row {
    left.iter().chain(right).cloned().collect()
}
