use crate::utils::error::CapacityExceeded;

/// Checks a course's resulting student count against the enrollment cap.
///
/// The validator holds a plain copy of the cap taken when it was built, so a
/// single validation never observes two different limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityValidator {
    limit: usize,
}

impl CapacityValidator {
    pub fn new(limit: usize) -> Self {
        Self { limit }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// `candidate_count` is the size of the student set after the write, not the delta.
    pub fn validate(&self, candidate_count: usize) -> Result<(), CapacityExceeded> {
        if candidate_count <= self.limit {
            Ok(())
        } else {
            Err(CapacityExceeded {
                attempted: candidate_count,
                limit: self.limit,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_is_inclusive() {
        let validator = CapacityValidator::new(20);

        assert!(validator.validate(0).is_ok());
        assert!(validator.validate(19).is_ok());
        assert!(validator.validate(20).is_ok());
        assert_eq!(
            validator.validate(21),
            Err(CapacityExceeded {
                attempted: 21,
                limit: 20
            })
        );
    }

    #[test]
    fn test_zero_limit_only_allows_empty_courses() {
        let validator = CapacityValidator::new(0);
        assert!(validator.validate(0).is_ok());
        assert!(validator.validate(1).is_err());
    }

    #[test]
    fn test_distinct_limits_are_independent() {
        let small = CapacityValidator::new(2);
        let large = CapacityValidator::new(30);

        assert!(small.validate(3).is_err());
        assert!(large.validate(3).is_ok());
        assert_eq!(small.limit(), 2);
    }
}
