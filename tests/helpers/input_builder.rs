// ==========================================
// BirthInput 构建器
// ==========================================

use ziwei_chart::{BirthInput, Gender};

pub struct BirthInputBuilder {
    input: BirthInput,
}

impl BirthInputBuilder {
    /// 默认样本: 1988-06-20 23:00 男, 公历
    pub fn new() -> Self {
        Self {
            input: BirthInput::solar(1988, 6, 20, 23, Gender::Male),
        }
    }

    pub fn solar(mut self, year: i32, month: u32, day: u32) -> Self {
        self.input.year = year;
        self.input.month = month;
        self.input.day = day;
        self.input.is_lunar = false;
        self.input.is_leap_month = false;
        self
    }

    pub fn lunar(mut self, year: i32, month: u32, day: u32, is_leap_month: bool) -> Self {
        self.input.year = year;
        self.input.month = month;
        self.input.day = day;
        self.input.is_lunar = true;
        self.input.is_leap_month = is_leap_month;
        self
    }

    pub fn hour(mut self, hour: u32) -> Self {
        self.input.hour = hour;
        self
    }

    pub fn minute(mut self, minute: u32) -> Self {
        self.input.minute = minute;
        self
    }

    pub fn female(mut self) -> Self {
        self.input.gender = Gender::Female;
        self
    }

    pub fn build(self) -> BirthInput {
        self.input
    }
}

impl Default for BirthInputBuilder {
    fn default() -> Self {
        Self::new()
    }
}
