//! 防抖闸门
//!
//! 每次输入生成一张新的票据并作废之前的票据；定时器到期时凭票据取值，
//! 只有最后一次输入的票据能取到值。计时本身由调用方（浏览器定时器）负责。

/// 输入票据
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

#[derive(Debug, Clone)]
pub struct Debounce<T> {
    generation: u64,
    pending: Option<T>,
}

impl<T> Default for Debounce<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Debounce<T> {
    pub fn new() -> Self {
        Self {
            generation: 0,
            pending: None,
        }
    }

    /// 记录一次新的输入，之前的票据全部失效
    pub fn push(&mut self, value: T) -> Ticket {
        self.generation += 1;
        self.pending = Some(value);
        Ticket(self.generation)
    }

    /// 定时器到期：票据仍是最新的才返回待处理的值
    pub fn fire(&mut self, ticket: Ticket) -> Option<T> {
        if ticket.0 == self.generation {
            self.pending.take()
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_last_input_fires() {
        let mut gate = Debounce::new();
        let first = gate.push("l");
        let second = gate.push("la");
        let third = gate.push("lamp");

        assert_eq!(gate.fire(first), None);
        assert_eq!(gate.fire(second), None);
        assert_eq!(gate.fire(third), Some("lamp"));
    }

    #[test]
    fn test_ticket_fires_once() {
        let mut gate = Debounce::new();
        let ticket = gate.push(1);
        assert_eq!(gate.fire(ticket), Some(1));
        assert_eq!(gate.fire(ticket), None);
    }

    #[test]
    fn test_later_input_after_fire_gets_new_ticket() {
        let mut gate = Debounce::new();
        let old = gate.push("desk");
        assert_eq!(gate.fire(old), Some("desk"));
        let new = gate.push("desk lamp");
        assert_eq!(gate.fire(old), None);
        assert_eq!(gate.fire(new), Some("desk lamp"));
    }
}
